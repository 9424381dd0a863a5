//! The root project object.

use crate::id::ObjectId;

/// Per-target entries of the project's `TargetAttributes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetAttributes {
    /// `CreatedOnToolsVersion`, e.g. `14.2`.
    pub created_on_tools_version: String,
    /// `LastSwiftMigration`, e.g. `1420`.
    pub last_swift_migration: String,
}

/// The project's `attributes` dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAttributes {
    /// `LastSwiftUpdateCheck`.
    pub last_swift_update_check: String,
    /// `LastUpgradeCheck`.
    pub last_upgrade_check: String,
    /// Attributes keyed by target.
    pub target_attributes: Vec<(ObjectId, TargetAttributes)>,
}

/// A `PBXProject`: the root of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project name, used in configuration list comments.
    pub name: String,
    /// Tool version attributes.
    pub attributes: ProjectAttributes,
    /// Project-scope configuration list.
    pub build_configuration_list: ObjectId,
    /// `compatibilityVersion`, e.g. `Xcode 14.0`.
    pub compatibility_version: String,
    /// `developmentRegion`.
    pub development_region: String,
    /// `knownRegions`.
    pub known_regions: Vec<String>,
    /// Root of the navigator.
    pub main_group: ObjectId,
    /// Remote packages, in declaration order.
    pub package_references: Vec<ObjectId>,
    /// Group holding the build products.
    pub product_ref_group: ObjectId,
    /// Targets of the project.
    pub targets: Vec<ObjectId>,
}
