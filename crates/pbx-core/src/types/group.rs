//! Navigator groups.

use crate::id::ObjectId;

use super::file::SourceTree;

/// A `PBXGroup`: a folder in the project navigator.
///
/// The main group has no name; every other group does.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    /// Display name, absent for the main group.
    pub name: Option<String>,
    /// File references and sub-groups, in discovery order.
    pub children: Vec<ObjectId>,
    /// What the group is relative to.
    pub source_tree: SourceTree,
}

impl Group {
    /// Creates an empty named group.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
