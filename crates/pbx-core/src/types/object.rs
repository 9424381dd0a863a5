//! The closed set of object kinds stored in a [`Catalog`](crate::Catalog).

use crate::id::ObjectId;

use super::configuration::{BuildConfiguration, ConfigurationList};
use super::file::FileReference;
use super::group::Group;
use super::package::{PackageReference, ProductDependency};
use super::phase::{BuildFile, BuildPhase, PhaseKind};
use super::project::Project;
use super::target::NativeTarget;

/// The `isa` of an object, which also names its section.
///
/// [`Isa::ALL`] is the order sections appear in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Isa {
    /// `PBXBuildFile`
    BuildFile,
    /// `PBXFileReference`
    FileReference,
    /// `PBXFrameworksBuildPhase`
    FrameworksBuildPhase,
    /// `PBXGroup`
    Group,
    /// `PBXNativeTarget`
    NativeTarget,
    /// `PBXProject`
    Project,
    /// `PBXResourcesBuildPhase`
    ResourcesBuildPhase,
    /// `PBXSourcesBuildPhase`
    SourcesBuildPhase,
    /// `XCBuildConfiguration`
    BuildConfiguration,
    /// `XCConfigurationList`
    ConfigurationList,
    /// `XCRemoteSwiftPackageReference`
    PackageReference,
    /// `XCSwiftPackageProductDependency`
    ProductDependency,
}

impl Isa {
    /// Every kind, in section order.
    pub const ALL: [Self; 12] = [
        Self::BuildFile,
        Self::FileReference,
        Self::FrameworksBuildPhase,
        Self::Group,
        Self::NativeTarget,
        Self::Project,
        Self::ResourcesBuildPhase,
        Self::SourcesBuildPhase,
        Self::BuildConfiguration,
        Self::ConfigurationList,
        Self::PackageReference,
        Self::ProductDependency,
    ];

    /// Returns the class name written in the `isa` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BuildFile => "PBXBuildFile",
            Self::FileReference => "PBXFileReference",
            Self::FrameworksBuildPhase => "PBXFrameworksBuildPhase",
            Self::Group => "PBXGroup",
            Self::NativeTarget => "PBXNativeTarget",
            Self::Project => "PBXProject",
            Self::ResourcesBuildPhase => "PBXResourcesBuildPhase",
            Self::SourcesBuildPhase => "PBXSourcesBuildPhase",
            Self::BuildConfiguration => "XCBuildConfiguration",
            Self::ConfigurationList => "XCConfigurationList",
            Self::PackageReference => "XCRemoteSwiftPackageReference",
            Self::ProductDependency => "XCSwiftPackageProductDependency",
        }
    }
}

/// Any object in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    /// See [`BuildFile`].
    BuildFile(BuildFile),
    /// See [`FileReference`].
    FileReference(FileReference),
    /// See [`Group`].
    Group(Group),
    /// See [`BuildPhase`].
    BuildPhase(BuildPhase),
    /// See [`NativeTarget`].
    NativeTarget(NativeTarget),
    /// See [`Project`].
    Project(Project),
    /// See [`BuildConfiguration`].
    BuildConfiguration(BuildConfiguration),
    /// See [`ConfigurationList`].
    ConfigurationList(ConfigurationList),
    /// See [`PackageReference`].
    PackageReference(PackageReference),
    /// See [`ProductDependency`].
    ProductDependency(ProductDependency),
}

impl Object {
    /// Returns the object's kind.
    #[must_use]
    pub const fn isa(&self) -> Isa {
        match self {
            Self::BuildFile(_) => Isa::BuildFile,
            Self::FileReference(_) => Isa::FileReference,
            Self::Group(_) => Isa::Group,
            Self::BuildPhase(phase) => match phase.kind {
                PhaseKind::Sources => Isa::SourcesBuildPhase,
                PhaseKind::Frameworks => Isa::FrameworksBuildPhase,
                PhaseKind::Resources => Isa::ResourcesBuildPhase,
            },
            Self::NativeTarget(_) => Isa::NativeTarget,
            Self::Project(_) => Isa::Project,
            Self::BuildConfiguration(_) => Isa::BuildConfiguration,
            Self::ConfigurationList(_) => Isa::ConfigurationList,
            Self::PackageReference(_) => Isa::PackageReference,
            Self::ProductDependency(_) => Isa::ProductDependency,
        }
    }

    /// Every identifier this object refers to.
    #[must_use]
    pub fn references(&self) -> Vec<ObjectId> {
        match self {
            Self::BuildFile(file) => vec![file.file_ref],
            Self::FileReference(_)
            | Self::BuildConfiguration(_)
            | Self::PackageReference(_) => Vec::new(),
            Self::Group(group) => group.children.clone(),
            Self::BuildPhase(phase) => phase.files.clone(),
            Self::NativeTarget(target) => {
                let mut refs = vec![target.build_configuration_list, target.product_reference];
                refs.extend(&target.build_phases);
                refs.extend(&target.package_product_dependencies);
                refs
            }
            Self::Project(project) => {
                let mut refs = vec![
                    project.build_configuration_list,
                    project.main_group,
                    project.product_ref_group,
                ];
                refs.extend(&project.package_references);
                refs.extend(&project.targets);
                refs.extend(project.attributes.target_attributes.iter().map(|(id, _)| *id));
                refs
            }
            Self::ConfigurationList(list) => list.configurations.clone(),
            Self::ProductDependency(dependency) => vec![dependency.package],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_order_is_sorted_by_class_name() {
        let names: Vec<_> = Isa::ALL.iter().map(|isa| isa.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&"PBXBuildFile"));
        assert_eq!(names.last(), Some(&"XCSwiftPackageProductDependency"));
    }

    #[test]
    fn test_phase_kind_selects_isa() {
        let phase = Object::BuildPhase(BuildPhase::new(PhaseKind::Resources));
        assert_eq!(phase.isa(), Isa::ResourcesBuildPhase);
        assert!(phase.references().is_empty());
    }

    #[test]
    fn test_build_file_references_its_file() {
        let file_ref = ObjectId::from_key("file:a.swift");
        let object = Object::BuildFile(BuildFile {
            file_ref,
            phase: PhaseKind::Sources,
        });
        assert_eq!(object.references(), vec![file_ref]);
    }
}
