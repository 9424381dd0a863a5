//! Text serializer for Xcode `project.pbxproj` files.
//!
//! This crate turns a validated [`Catalog`] into the old-style property list
//! Xcode reads. Output is a pure function of the catalog: the same graph
//! always produces the same bytes.
//!
//! # Layers
//!
//! - [`Value`] and [`quote`]: scalars, references, arrays, dictionaries
//! - [`Record`]: one object entry with its fields in a fixed order
//! - [`Document`]: the envelope and the sections, in kind order
//!
//! # Example
//!
//! ```
//! use pbx_core::{Inventory, ProjectConfig, assemble};
//!
//! let catalog = assemble(&ProjectConfig::default(), &[], &Inventory::default())?;
//! let text = pbx_render::serialize(&catalog);
//!
//! assert!(text.starts_with("// !$*UTF8*$!\n"));
//! assert!(text.contains("/* Begin PBXProject section */"));
//! # Ok::<(), pbx_core::GraphError>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod document;
mod objects;
mod record;
mod value;

use pbx_core::Catalog;
use tracing::debug;

pub use document::{Document, ENCODING_MARKER};
pub use objects::label;
pub use record::{Layout, Record};
pub use value::{Value, quote};

/// The `objectVersion` written when none is configured.
pub const DEFAULT_OBJECT_VERSION: u32 = 54;

/// Renders catalogs with a fixed file format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Serializer {
    object_version: u32,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(DEFAULT_OBJECT_VERSION)
    }
}

impl Serializer {
    /// Creates a serializer writing the given `objectVersion`.
    #[must_use]
    pub const fn new(object_version: u32) -> Self {
        Self { object_version }
    }

    /// Renders the whole catalog.
    ///
    /// Objects keep their catalog insertion order within each section.
    #[must_use]
    pub fn serialize(&self, catalog: &Catalog) -> String {
        let mut document = Document::new(self.object_version, catalog.root());
        for (id, object) in catalog.iter() {
            document.push(object.isa(), objects::record(catalog, id, object));
        }

        let text = document.finish();
        debug!(
            objects = catalog.len(),
            bytes = text.len(),
            object_version = self.object_version,
            "Serialized project"
        );
        text
    }
}

/// Renders the catalog with [`DEFAULT_OBJECT_VERSION`].
#[must_use]
pub fn serialize(catalog: &Catalog) -> String {
    Serializer::default().serialize(catalog)
}
