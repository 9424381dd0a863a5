//! Per-kind field layout and comment labels.

use pbx_core::{
    BuildConfiguration, BuildFile, BuildPhase, Catalog, ConfigurationList, FileReference, Group,
    NativeTarget, Object, ObjectId, PackageReference, PhaseKind, ProductDependency, Project,
    SettingValue, UP_TO_NEXT_MAJOR,
};

use crate::record::{Layout, Record};
use crate::value::Value;

/// The comment Xcode writes next to references to `id`.
///
/// Returns `None` for the main group, which carries no label, and for
/// identifiers not in the catalog.
#[must_use]
pub fn label(catalog: &Catalog, id: ObjectId) -> Option<String> {
    match catalog.get(id)? {
        Object::BuildFile(file) => {
            let name = match catalog.get(file.file_ref) {
                Some(Object::FileReference(reference)) => reference.name.as_str(),
                _ => "(null)",
            };
            Some(format!("{name} in {}", file.phase.label()))
        }
        Object::FileReference(reference) => Some(reference.name.clone()),
        Object::Group(group) => group.name.clone(),
        Object::BuildPhase(phase) => Some(phase.kind.label().to_owned()),
        Object::NativeTarget(target) => Some(target.name.clone()),
        Object::Project(_) => Some("Project object".to_owned()),
        Object::BuildConfiguration(config) => Some(config.name.as_str().to_owned()),
        Object::ConfigurationList(list) => Some(list.owner.label()),
        Object::PackageReference(package) => Some(package_label(package)),
        Object::ProductDependency(dependency) => Some(dependency.product_name.clone()),
    }
}

fn package_label(package: &PackageReference) -> String {
    format!("XCRemoteSwiftPackageReference \"{}\"", package.url)
}

/// Renders the record for one object.
pub fn record(catalog: &Catalog, id: ObjectId, object: &Object) -> Record {
    let refs = Refs(catalog);
    let record = match object {
        Object::BuildFile(file) => build_file(&refs, id, file),
        Object::FileReference(reference) => file_reference(id, reference),
        Object::Group(group) => self::group(&refs, id, group),
        Object::BuildPhase(phase) => build_phase(&refs, id, phase),
        Object::NativeTarget(target) => native_target(&refs, id, target),
        Object::Project(project) => self::project(&refs, id, project),
        Object::BuildConfiguration(config) => build_configuration(id, config),
        Object::ConfigurationList(list) => configuration_list(&refs, id, list),
        Object::PackageReference(package) => package_reference(id, package),
        Object::ProductDependency(dependency) => product_dependency(&refs, id, dependency),
    };
    record.maybe_comment(label(catalog, id))
}

/// Builds labelled reference values.
struct Refs<'a>(&'a Catalog);

impl Refs<'_> {
    fn one(&self, id: ObjectId) -> Value {
        Value::Ref {
            id,
            comment: label(self.0, id),
        }
    }

    fn list(&self, ids: &[ObjectId]) -> Value {
        Value::List(ids.iter().map(|id| self.one(*id)).collect())
    }
}

fn isa(object: &str) -> Value {
    Value::text(object)
}

fn build_file(refs: &Refs<'_>, id: ObjectId, file: &BuildFile) -> Record {
    Record::new(id, Layout::Inline)
        .field("isa", isa("PBXBuildFile"))
        .field("fileRef", refs.one(file.file_ref))
}

fn file_reference(id: ObjectId, reference: &FileReference) -> Record {
    let record = Record::new(id, Layout::Inline).field("isa", isa("PBXFileReference"));
    let record = if reference.file_type.is_explicit() {
        record
            .field("explicitFileType", Value::text(reference.file_type.as_str()))
            .field("includeInIndex", Value::text(0))
    } else {
        record.field("lastKnownFileType", Value::text(reference.file_type.as_str()))
    };
    record
        .field("path", Value::text(&reference.path))
        .field("sourceTree", Value::text(reference.source_tree.as_str()))
}

fn group(refs: &Refs<'_>, id: ObjectId, group: &Group) -> Record {
    let record = Record::new(id, Layout::Multiline)
        .field("isa", isa("PBXGroup"))
        .field("children", refs.list(&group.children));
    let record = match &group.name {
        Some(name) => record.field("name", Value::text(name)),
        None => record,
    };
    record.field("sourceTree", Value::text(group.source_tree.as_str()))
}

fn build_phase(refs: &Refs<'_>, id: ObjectId, phase: &BuildPhase) -> Record {
    let kind = match phase.kind {
        PhaseKind::Sources => "PBXSourcesBuildPhase",
        PhaseKind::Frameworks => "PBXFrameworksBuildPhase",
        PhaseKind::Resources => "PBXResourcesBuildPhase",
    };
    Record::new(id, Layout::Multiline)
        .field("isa", isa(kind))
        .field("buildActionMask", Value::text(BuildPhase::BUILD_ACTION_MASK))
        .field("files", refs.list(&phase.files))
        .field("runOnlyForDeploymentPostprocessing", Value::text(0))
}

fn native_target(refs: &Refs<'_>, id: ObjectId, target: &NativeTarget) -> Record {
    Record::new(id, Layout::Multiline)
        .field("isa", isa("PBXNativeTarget"))
        .field("buildConfigurationList", refs.one(target.build_configuration_list))
        .field("buildPhases", refs.list(&target.build_phases))
        .field("buildRules", Value::List(Vec::new()))
        .field("dependencies", Value::List(Vec::new()))
        .field("name", Value::text(&target.name))
        .field(
            "packageProductDependencies",
            refs.list(&target.package_product_dependencies),
        )
        .field("productName", Value::text(&target.product_name))
        .field("productReference", refs.one(target.product_reference))
        .field("productType", Value::text(&target.product_type))
}

fn project(refs: &Refs<'_>, id: ObjectId, project: &Project) -> Record {
    let attributes = &project.attributes;
    let targets = attributes
        .target_attributes
        .iter()
        .map(|(target, entry)| {
            let fields = vec![
                (
                    "CreatedOnToolsVersion".to_owned(),
                    Value::text(&entry.created_on_tools_version),
                ),
                (
                    "LastSwiftMigration".to_owned(),
                    Value::text(&entry.last_swift_migration),
                ),
            ];
            (target.to_string(), Value::Dict(fields))
        })
        .collect();

    let attributes = Value::Dict(vec![
        (
            "LastSwiftUpdateCheck".to_owned(),
            Value::text(&attributes.last_swift_update_check),
        ),
        (
            "LastUpgradeCheck".to_owned(),
            Value::text(&attributes.last_upgrade_check),
        ),
        ("TargetAttributes".to_owned(), Value::Dict(targets)),
    ]);

    Record::new(id, Layout::Multiline)
        .field("isa", isa("PBXProject"))
        .field("attributes", attributes)
        .field("buildConfigurationList", refs.one(project.build_configuration_list))
        .field("compatibilityVersion", Value::text(&project.compatibility_version))
        .field("developmentRegion", Value::text(&project.development_region))
        .field("hasScannedForEncodings", Value::text(0))
        .field("knownRegions", Value::texts(&project.known_regions))
        .field("mainGroup", Value::bare(project.main_group))
        .field("packageReferences", refs.list(&project.package_references))
        .field("productRefGroup", Value::bare(project.product_ref_group))
        .field("projectDirPath", Value::text(""))
        .field("projectRoot", Value::text(""))
        .field("targets", refs.list(&project.targets))
}

fn build_configuration(id: ObjectId, config: &BuildConfiguration) -> Record {
    let settings = config
        .settings
        .iter()
        .map(|(key, value)| {
            let value = match value {
                SettingValue::Text(text) => Value::text(text),
                SettingValue::List(items) => Value::texts(items),
            };
            (key.clone(), value)
        })
        .collect();

    Record::new(id, Layout::Multiline)
        .field("isa", isa("XCBuildConfiguration"))
        .field("buildSettings", Value::Dict(settings))
        .field("name", Value::text(config.name.as_str()))
}

fn configuration_list(refs: &Refs<'_>, id: ObjectId, list: &ConfigurationList) -> Record {
    Record::new(id, Layout::Multiline)
        .field("isa", isa("XCConfigurationList"))
        .field("buildConfigurations", refs.list(&list.configurations))
        .field(
            "defaultConfigurationIsVisible",
            Value::text(u8::from(list.default_visible)),
        )
        .field("defaultConfigurationName", Value::text(list.default_name.as_str()))
}

fn package_reference(id: ObjectId, package: &PackageReference) -> Record {
    let requirement = Value::Dict(vec![
        ("kind".to_owned(), Value::text(UP_TO_NEXT_MAJOR)),
        (
            "minimumVersion".to_owned(),
            Value::text(&package.minimum_version),
        ),
    ]);
    Record::new(id, Layout::Multiline)
        .field("isa", isa("XCRemoteSwiftPackageReference"))
        .field("repositoryURL", Value::text(&package.url))
        .field("requirement", requirement)
}

fn product_dependency(refs: &Refs<'_>, id: ObjectId, dependency: &ProductDependency) -> Record {
    Record::new(id, Layout::Multiline)
        .field("isa", isa("XCSwiftPackageProductDependency"))
        .field("package", refs.one(dependency.package))
        .field("productName", Value::text(&dependency.product_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbx_core::{FileType, Inventory, InputFile, ProjectConfig, assemble};

    fn catalog() -> Catalog {
        let inventory = Inventory {
            sources: vec![InputFile::new("Sources/VoiceMemo/App.swift")],
            resources: vec![InputFile::new("Sources/VoiceMemo/Resources/AppIcon.icns")],
        };
        assemble(&ProjectConfig::default(), &[], &inventory).unwrap()
    }

    #[test]
    fn test_build_file_label_names_file_and_phase() {
        let catalog = catalog();
        let source = ObjectId::from_key("build:Sources/VoiceMemo/App.swift");
        let resource = ObjectId::from_key("resourcebuild:Sources/VoiceMemo/Resources/AppIcon.icns");
        assert_eq!(label(&catalog, source).as_deref(), Some("App.swift in Sources"));
        assert_eq!(
            label(&catalog, resource).as_deref(),
            Some("AppIcon.icns in Resources")
        );
    }

    #[test]
    fn test_main_group_has_no_label() {
        let catalog = catalog();
        assert_eq!(label(&catalog, ObjectId::from_key("group:main")), None);
        assert_eq!(
            label(&catalog, ObjectId::from_key("group:sources")).as_deref(),
            Some("Sources")
        );
        assert_eq!(label(&catalog, ObjectId::from_key("unknown")), None);
    }

    #[test]
    fn test_product_reference_is_explicit() {
        let id = ObjectId::from_key("product:app");
        let reference = FileReference {
            name: "VoiceMemo.app".to_owned(),
            path: "VoiceMemo.app".into(),
            file_type: FileType::Application,
            source_tree: pbx_core::SourceTree::BuiltProductsDir,
        };
        let text = file_reference(id, &reference).comment("VoiceMemo.app").render();
        assert_eq!(
            text,
            format!(
                "\t\t{id} /* VoiceMemo.app */ = {{isa = PBXFileReference; explicitFileType = wrapper.application; includeInIndex = 0; path = VoiceMemo.app; sourceTree = BUILT_PRODUCTS_DIR; }};\n"
            )
        );
    }

    #[test]
    fn test_build_settings_lists_are_multiline() {
        let catalog = catalog();
        let id = ObjectId::from_key("config:project:debug");
        let object = catalog.get(id).unwrap();
        let text = record(&catalog, id, object).render();
        assert!(text.contains(
            "\t\t\t\tGCC_PREPROCESSOR_DEFINITIONS = (\n\t\t\t\t\t\"DEBUG=1\",\n\t\t\t\t\t\"$(inherited)\",\n\t\t\t\t);\n"
        ));
        assert!(text.ends_with("\t\t\tname = Debug;\n\t\t};\n"));
    }
}
