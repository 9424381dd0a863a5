//! Object types of the project graph.
//!
//! # Module Organization
//!
//! - `file` - discovered inputs and file references
//! - `phase` - build phases and build-file wrappers
//! - `group` - navigator groups
//! - `target` - the native target
//! - `configuration` - build configurations and configuration lists
//! - `package` - Swift package references and product dependencies
//! - `project` - the root project object
//! - `object` - the [`Object`] sum type and its [`Isa`]
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use pbx_core::{FileReference, Isa, Object, ObjectId};
//! ```

mod configuration;
mod file;
mod group;
mod object;
mod package;
mod phase;
mod project;
mod target;

pub use configuration::{
    BuildConfiguration, BuildSettings, ConfigurationList, ConfigurationName, ListOwner,
    SettingValue,
};
pub use file::{FileReference, FileType, InputFile, Inventory, SourceTree};
pub use group::Group;
pub use object::{Isa, Object};
pub use package::{PackageReference, ProductDependency, UP_TO_NEXT_MAJOR};
pub use phase::{BuildFile, BuildPhase, PhaseKind};
pub use project::{Project, ProjectAttributes, TargetAttributes};
pub use target::{APPLICATION_PRODUCT_TYPE, NativeTarget};
