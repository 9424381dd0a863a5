//! Object identifiers, entity graph, and configuration for pbxgen.
//!
//! This crate is the pure core of the generator:
//!
//! - [`ObjectId`] / [`IdMinter`] - deterministic identifiers derived from keys
//! - [`types`] - the objects of a project file
//! - [`Catalog`] - the flat, insertion-ordered object table
//! - [`assemble()`] - builds the full graph from an [`Inventory`]
//! - [`Config`] - project identity, scan settings, and package list
//!
//! Nothing here touches the filesystem except [`Config::load`].

#![deny(clippy::all)]
#![warn(missing_docs)]

mod assemble;
mod catalog;
mod config;
mod error;
mod id;
mod settings;
pub mod types;

pub use assemble::assemble;
pub use catalog::Catalog;
pub use config::{
    Config, PROJECT_FILE_NAME, PackageDependency, ProjectConfig, ScanConfig, ToolsConfig,
};
pub use error::{ConfigError, GraphError};
pub use id::{IdMinter, ObjectId};
pub use settings::{project_settings, target_settings};
pub use types::*;
