//! Builds the complete object graph from the enumerated inputs.
//!
//! The topology is fixed: one application target with Sources, Frameworks
//! and Resources phases, Debug/Release configurations at project and target
//! scope, and one product dependency per declared package product. Only the
//! file lists and the package list vary between runs.
//!
//! # Key namespaces
//!
//! | Object | Key |
//! |---|---|
//! | source file / build file | `file:<path>` / `build:<path>` |
//! | resource file / build file | `resource:<path>` / `resourcebuild:<path>` |
//! | package reference | `pkgref:<url>` |
//! | product dependency | `pkgdep:<product>` |
//!
//! Fixed objects use constant keys such as `project`, `group:main` and
//! `config:target:release`.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::config::{PackageDependency, ProjectConfig};
use crate::error::GraphError;
use crate::id::{IdMinter, ObjectId};
use crate::settings::{project_settings, target_settings};
use crate::types::{
    APPLICATION_PRODUCT_TYPE, BuildConfiguration, BuildFile, BuildPhase, BuildSettings,
    ConfigurationList, ConfigurationName, FileReference, FileType, Group, InputFile, Inventory,
    ListOwner, NativeTarget, Object, PackageReference, PhaseKind, ProductDependency, Project,
    ProjectAttributes, SourceTree, TargetAttributes,
};

/// Identifiers of the objects every project has.
///
/// Minted once at the start of assembly and passed around explicitly.
#[derive(Debug, Clone, Copy)]
struct FixedIds {
    project: ObjectId,
    main_group: ObjectId,
    sources_group: ObjectId,
    resources_group: ObjectId,
    products_group: ObjectId,
    product_ref: ObjectId,
    target: ObjectId,
    info_plist: ObjectId,
    entitlements: ObjectId,
    sources_phase: ObjectId,
    resources_phase: ObjectId,
    frameworks_phase: ObjectId,
    project_configs: ScopeIds,
    target_configs: ScopeIds,
}

/// Configuration list and configurations of one scope.
#[derive(Debug, Clone, Copy)]
struct ScopeIds {
    list: ObjectId,
    debug: ObjectId,
    release: ObjectId,
}

impl ScopeIds {
    fn mint(minter: &mut IdMinter, scope: &str) -> Result<Self, GraphError> {
        Ok(Self {
            list: minter.mint(&format!("configlist:{scope}"))?,
            debug: minter.mint(&format!("config:{scope}:{}", ConfigurationName::Debug.key()))?,
            release: minter.mint(&format!(
                "config:{scope}:{}",
                ConfigurationName::Release.key()
            ))?,
        })
    }

    const fn config(self, name: ConfigurationName) -> ObjectId {
        match name {
            ConfigurationName::Debug => self.debug,
            ConfigurationName::Release => self.release,
        }
    }
}

impl FixedIds {
    fn mint(minter: &mut IdMinter, project: &ProjectConfig) -> Result<Self, GraphError> {
        Ok(Self {
            project: minter.mint("project")?,
            main_group: minter.mint("group:main")?,
            sources_group: minter.mint("group:sources")?,
            resources_group: minter.mint("group:resources")?,
            products_group: minter.mint("group:products")?,
            product_ref: minter.mint("product:app")?,
            target: minter.mint("target:app")?,
            info_plist: minter.mint(&format!("file:{}", project.info_plist_path))?,
            entitlements: minter.mint(&format!("file:{}", project.entitlements_path))?,
            sources_phase: minter.mint("phase:sources")?,
            resources_phase: minter.mint("phase:resources")?,
            frameworks_phase: minter.mint("phase:frameworks")?,
            project_configs: ScopeIds::mint(minter, "project")?,
            target_configs: ScopeIds::mint(minter, "target")?,
        })
    }
}

/// Builds and validates the object graph for one project.
///
/// Objects are inserted in the order they are written within their
/// sections: file references for the product, entitlements and Info
/// descriptor come first, then sources and resources in discovery order.
///
/// # Examples
///
/// ```
/// use pbx_core::{Config, InputFile, Inventory, Isa, assemble};
///
/// let config = Config::default();
/// let inventory = Inventory {
///     sources: vec![InputFile::new("Sources/VoiceMemo/App.swift")],
///     resources: vec![],
/// };
///
/// let catalog = assemble(&config.project, &config.packages, &inventory)?;
/// assert_eq!(catalog.objects_of(Isa::BuildFile).count(), 1);
/// assert_eq!(catalog.objects_of(Isa::PackageReference).count(), 3);
/// # Ok::<(), pbx_core::GraphError>(())
/// ```
pub fn assemble(
    project: &ProjectConfig,
    packages: &[PackageDependency],
    inventory: &Inventory,
) -> Result<Catalog, GraphError> {
    let mut minter = IdMinter::new();
    let ids = FixedIds::mint(&mut minter, project)?;
    let mut catalog = Catalog::new(ids.project);

    insert_fixed_file_refs(&mut catalog, &ids, project)?;

    let (source_refs, source_builds) = insert_files(
        &mut catalog,
        &mut minter,
        &inventory.sources,
        PhaseKind::Sources,
    )?;
    let (resource_refs, resource_builds) = insert_files(
        &mut catalog,
        &mut minter,
        &inventory.resources,
        PhaseKind::Resources,
    )?;

    insert_groups(&mut catalog, &ids, source_refs, resource_refs)?;

    catalog.insert(
        ids.frameworks_phase,
        Object::BuildPhase(BuildPhase::new(PhaseKind::Frameworks)),
    )?;
    catalog.insert(
        ids.resources_phase,
        Object::BuildPhase(BuildPhase {
            kind: PhaseKind::Resources,
            files: resource_builds,
        }),
    )?;
    catalog.insert(
        ids.sources_phase,
        Object::BuildPhase(BuildPhase {
            kind: PhaseKind::Sources,
            files: source_builds,
        }),
    )?;

    let (package_refs, product_deps) = insert_packages(&mut catalog, &mut minter, packages)?;

    insert_configurations(
        &mut catalog,
        ids.project_configs,
        ListOwner::Project(project.name.clone()),
        |name| project_settings(project, name),
    )?;
    insert_configurations(
        &mut catalog,
        ids.target_configs,
        ListOwner::Target(project.name.clone()),
        |name| target_settings(project, name),
    )?;

    catalog.insert(
        ids.target,
        Object::NativeTarget(NativeTarget {
            name: project.name.clone(),
            build_configuration_list: ids.target_configs.list,
            build_phases: vec![ids.sources_phase, ids.frameworks_phase, ids.resources_phase],
            package_product_dependencies: product_deps,
            product_name: project.name.clone(),
            product_reference: ids.product_ref,
            product_type: APPLICATION_PRODUCT_TYPE.to_owned(),
        }),
    )?;

    let tools = &project.tools;
    catalog.insert(
        ids.project,
        Object::Project(Project {
            name: project.name.clone(),
            attributes: ProjectAttributes {
                last_swift_update_check: tools.last_upgrade_check.clone(),
                last_upgrade_check: tools.last_upgrade_check.clone(),
                target_attributes: vec![(
                    ids.target,
                    TargetAttributes {
                        created_on_tools_version: tools.created_on_tools_version.clone(),
                        last_swift_migration: tools.last_upgrade_check.clone(),
                    },
                )],
            },
            build_configuration_list: ids.project_configs.list,
            compatibility_version: tools.compatibility_version.clone(),
            development_region: "en".to_owned(),
            known_regions: vec!["en".to_owned(), "Base".to_owned()],
            main_group: ids.main_group,
            package_references: package_refs,
            product_ref_group: ids.products_group,
            targets: vec![ids.target],
        }),
    )?;

    catalog.validate()?;

    debug!(
        sources = inventory.sources.len(),
        resources = inventory.resources.len(),
        packages = packages.len(),
        objects = catalog.len(),
        identifiers = minter.len(),
        "assembled project graph"
    );

    Ok(catalog)
}

fn insert_fixed_file_refs(
    catalog: &mut Catalog,
    ids: &FixedIds,
    project: &ProjectConfig,
) -> Result<(), GraphError> {
    catalog.insert(
        ids.product_ref,
        Object::FileReference(FileReference {
            name: project.product_file_name(),
            path: project.product_file_name().into(),
            file_type: FileType::Application,
            source_tree: SourceTree::BuiltProductsDir,
        }),
    )?;

    let entitlements = InputFile::new(project.entitlements_path.clone());
    catalog.insert(
        ids.entitlements,
        Object::FileReference(FileReference::from_input(
            &entitlements,
            FileType::Entitlements,
        )),
    )?;

    let info_plist = InputFile::new(project.info_plist_path.clone());
    catalog.insert(
        ids.info_plist,
        Object::FileReference(FileReference::from_input(&info_plist, FileType::PlistXml)),
    )?;

    Ok(())
}

/// Inserts a file reference and a build file for every input.
///
/// Returns the file reference ids and build file ids, both in input order.
fn insert_files(
    catalog: &mut Catalog,
    minter: &mut IdMinter,
    files: &[InputFile],
    phase: PhaseKind,
) -> Result<(Vec<ObjectId>, Vec<ObjectId>), GraphError> {
    let (ref_ns, build_ns) = match phase {
        PhaseKind::Resources => ("resource", "resourcebuild"),
        PhaseKind::Sources | PhaseKind::Frameworks => ("file", "build"),
    };

    let mut refs = Vec::with_capacity(files.len());
    let mut builds = Vec::with_capacity(files.len());

    for file in files {
        let file_ref = minter.mint(&format!("{ref_ns}:{}", file.path))?;
        let build = minter.mint(&format!("{build_ns}:{}", file.path))?;

        let file_type = match phase {
            PhaseKind::Resources => FileType::for_resource(&file.path),
            PhaseKind::Sources | PhaseKind::Frameworks => file
                .path
                .extension()
                .and_then(FileType::for_source)
                .unwrap_or(FileType::Generic),
        };

        catalog.insert(
            file_ref,
            Object::FileReference(FileReference::from_input(file, file_type)),
        )?;
        catalog.insert(build, Object::BuildFile(BuildFile { file_ref, phase }))?;

        refs.push(file_ref);
        builds.push(build);
    }

    Ok((refs, builds))
}

fn insert_groups(
    catalog: &mut Catalog,
    ids: &FixedIds,
    source_refs: Vec<ObjectId>,
    resource_refs: Vec<ObjectId>,
) -> Result<(), GraphError> {
    catalog.insert(
        ids.main_group,
        Object::Group(Group {
            name: None,
            children: vec![
                ids.sources_group,
                ids.resources_group,
                ids.products_group,
                ids.entitlements,
            ],
            source_tree: SourceTree::Group,
        }),
    )?;

    let mut sources = Group::named("Sources");
    sources.children.push(ids.info_plist);
    sources.children.extend(source_refs);
    catalog.insert(ids.sources_group, Object::Group(sources))?;

    let mut resources = Group::named("Resources");
    resources.children = resource_refs;
    catalog.insert(ids.resources_group, Object::Group(resources))?;

    let mut products = Group::named("Products");
    products.children.push(ids.product_ref);
    catalog.insert(ids.products_group, Object::Group(products))?;

    Ok(())
}

/// Inserts package references (one per URL) and product dependencies.
///
/// Returns the package reference ids and product dependency ids in
/// declaration order.
fn insert_packages(
    catalog: &mut Catalog,
    minter: &mut IdMinter,
    packages: &[PackageDependency],
) -> Result<(Vec<ObjectId>, Vec<ObjectId>), GraphError> {
    let mut by_url: FxHashMap<&str, (ObjectId, &str)> = FxHashMap::default();
    let mut product_urls: FxHashMap<&str, &str> = FxHashMap::default();
    let mut package_refs = Vec::new();
    let mut product_deps = Vec::new();

    for dependency in packages {
        let package = if let Some(&(id, version)) = by_url.get(dependency.url.as_str()) {
            if version != dependency.minimum_version {
                warn!(
                    url = %dependency.url,
                    kept = version,
                    ignored = %dependency.minimum_version,
                    "package declared with conflicting versions"
                );
            }
            id
        } else {
            let id = minter.mint(&format!("pkgref:{}", dependency.url))?;
            catalog.insert(
                id,
                Object::PackageReference(PackageReference {
                    url: dependency.url.clone(),
                    minimum_version: dependency.minimum_version.clone(),
                }),
            )?;
            by_url.insert(&dependency.url, (id, dependency.minimum_version.as_str()));
            package_refs.push(id);
            id
        };

        if let Some(&first_url) = product_urls.get(dependency.product.as_str()) {
            if first_url != dependency.url {
                return Err(GraphError::ConflictingProduct {
                    product: dependency.product.clone(),
                    first_url: first_url.to_owned(),
                    second_url: dependency.url.clone(),
                });
            }
            warn!(
                url = %dependency.url,
                product = %dependency.product,
                "duplicate package product ignored"
            );
            continue;
        }
        product_urls.insert(&dependency.product, &dependency.url);

        let id = minter.mint(&format!("pkgdep:{}", dependency.product))?;
        catalog.insert(
            id,
            Object::ProductDependency(ProductDependency {
                package,
                product_name: dependency.product.clone(),
            }),
        )?;
        product_deps.push(id);
    }

    Ok((package_refs, product_deps))
}

fn insert_configurations(
    catalog: &mut Catalog,
    scope: ScopeIds,
    owner: ListOwner,
    settings: impl Fn(ConfigurationName) -> BuildSettings,
) -> Result<(), GraphError> {
    for name in ConfigurationName::ALL {
        catalog.insert(
            scope.config(name),
            Object::BuildConfiguration(BuildConfiguration {
                name,
                settings: settings(name),
            }),
        )?;
    }

    catalog.insert(
        scope.list,
        Object::ConfigurationList(ConfigurationList {
            owner,
            configurations: ConfigurationName::ALL
                .iter()
                .map(|name| scope.config(*name))
                .collect(),
            default_name: ConfigurationName::Release,
            default_visible: false,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;
    use crate::config::Config;
    use crate::types::Isa;

    fn inventory(sources: &[&str], resources: &[&str]) -> Inventory {
        Inventory {
            sources: sources.iter().map(|p| InputFile::new(*p)).collect(),
            resources: resources.iter().map(|p| InputFile::new(*p)).collect(),
        }
    }

    fn build(inv: &Inventory, packages: &[PackageDependency]) -> Catalog {
        assemble(&ProjectConfig::default(), packages, inv).unwrap()
    }

    fn group<'a>(catalog: &'a Catalog, key: &str) -> &'a Group {
        match catalog.get(ObjectId::from_key(key)) {
            Some(Object::Group(group)) => group,
            other => panic!("expected group for {key}, got {other:?}"),
        }
    }

    fn phase<'a>(catalog: &'a Catalog, key: &str) -> &'a BuildPhase {
        match catalog.get(ObjectId::from_key(key)) {
            Some(Object::BuildPhase(phase)) => phase,
            other => panic!("expected phase for {key}, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_inventory_is_valid() {
        let catalog = build(&Inventory::default(), &[]);

        assert!(catalog.validate().is_ok());
        assert!(phase(&catalog, "phase:sources").files.is_empty());
        assert!(phase(&catalog, "phase:resources").files.is_empty());
        assert!(phase(&catalog, "phase:frameworks").files.is_empty());
        assert!(group(&catalog, "group:resources").children.is_empty());
        assert_eq!(catalog.objects_of(Isa::NativeTarget).count(), 1);
        assert_eq!(catalog.objects_of(Isa::Project).count(), 1);
        assert_eq!(catalog.objects_of(Isa::BuildFile).count(), 0);
    }

    #[test]
    fn test_sources_and_resources_are_wired() {
        let inv = inventory(
            &["Sources/App/B.swift", "Sources/App/A.swift"],
            &["Sources/App/Resources/icon.icns"],
        );
        let catalog = build(&inv, &[]);

        let sources = phase(&catalog, "phase:sources");
        assert_eq!(
            sources.files,
            vec![
                ObjectId::from_key("build:Sources/App/B.swift"),
                ObjectId::from_key("build:Sources/App/A.swift"),
            ]
        );

        let resources = phase(&catalog, "phase:resources");
        assert_eq!(
            resources.files,
            vec![ObjectId::from_key(
                "resourcebuild:Sources/App/Resources/icon.icns"
            )]
        );

        let sources_group = group(&catalog, "group:sources");
        assert_eq!(
            sources_group.children,
            vec![
                ObjectId::from_key("file:Sources/VoiceMemo/Info.plist"),
                ObjectId::from_key("file:Sources/App/B.swift"),
                ObjectId::from_key("file:Sources/App/A.swift"),
            ]
        );
    }

    #[test]
    fn test_build_file_points_at_its_reference() {
        let inv = inventory(&["Sources/App/A.swift"], &[]);
        let catalog = build(&inv, &[]);

        let wrapper = catalog.get(ObjectId::from_key("build:Sources/App/A.swift"));
        assert!(matches!(
            wrapper,
            Some(Object::BuildFile(BuildFile { file_ref, phase: PhaseKind::Sources }))
                if *file_ref == ObjectId::from_key("file:Sources/App/A.swift")
        ));
    }

    #[test]
    fn test_resource_types_are_inferred() {
        let inv = inventory(
            &[],
            &["R/icon.icns", "R/photo.jpg", "R/photo.jpeg", "R/data.bin"],
        );
        let catalog = build(&inv, &[]);

        let type_of = |path: &str| match catalog.get(ObjectId::from_key(&format!("resource:{path}"))) {
            Some(Object::FileReference(file)) => file.file_type,
            other => panic!("expected file reference, got {other:?}"),
        };
        assert_eq!(type_of("R/icon.icns"), FileType::Icns);
        assert_eq!(type_of("R/photo.jpg"), FileType::Jpeg);
        assert_eq!(type_of("R/photo.jpeg"), FileType::Jpeg);
        assert_eq!(type_of("R/data.bin"), FileType::Generic);
    }

    #[test]
    fn test_no_entity_in_two_groups() {
        let inv = inventory(&["S/a.swift", "S/b.swift"], &["R/a.png"]);
        let catalog = build(&inv, &[]);

        let mut seen = FxHashSet::default();
        for (_, object) in catalog.objects_of(Isa::Group) {
            if let Object::Group(group) = object {
                for child in &group.children {
                    assert!(seen.insert(*child), "{child} appears in two groups");
                }
            }
        }
    }

    #[test]
    fn test_dependency_wiring() {
        let packages = [PackageDependency::new("https://example.com/pkg.git", "1.2.0", "Pkg")];
        let catalog = build(&Inventory::default(), &packages);

        let refs: Vec<_> = catalog.objects_of(Isa::PackageReference).collect();
        assert_eq!(refs.len(), 1);
        let (ref_id, _) = refs[0];
        assert_eq!(ref_id, ObjectId::from_key("pkgref:https://example.com/pkg.git"));

        let dep_id = ObjectId::from_key("pkgdep:Pkg");
        assert!(matches!(
            catalog.get(dep_id),
            Some(Object::ProductDependency(dep)) if dep.package == ref_id && dep.product_name == "Pkg"
        ));
        assert!(matches!(
            catalog.get(ObjectId::from_key("target:app")),
            Some(Object::NativeTarget(target)) if target.package_product_dependencies == vec![dep_id]
        ));
        assert_eq!(
            catalog.project().map(|p| p.package_references.clone()),
            Some(vec![ref_id])
        );
    }

    #[test]
    fn test_packages_deduplicated_by_url() {
        let packages = [
            PackageDependency::new("https://example.com/kit.git", "2.0.0", "KitCore"),
            PackageDependency::new("https://example.com/kit.git", "2.1.0", "KitUI"),
            PackageDependency::new("https://example.com/kit.git", "2.0.0", "KitUI"),
        ];
        let catalog = build(&Inventory::default(), &packages);

        assert_eq!(catalog.objects_of(Isa::PackageReference).count(), 1);
        assert_eq!(catalog.objects_of(Isa::ProductDependency).count(), 2);
        assert!(matches!(
            catalog.get(ObjectId::from_key("pkgref:https://example.com/kit.git")),
            Some(Object::PackageReference(p)) if p.minimum_version == "2.0.0"
        ));
    }

    #[test]
    fn test_same_product_from_two_urls_is_rejected() {
        let packages = [
            PackageDependency::new("https://example.com/a.git", "1.0.0", "Shared"),
            PackageDependency::new("https://example.com/b.git", "1.0.0", "Shared"),
        ];
        let err = assemble(&ProjectConfig::default(), &packages, &Inventory::default()).unwrap_err();
        assert!(matches!(
            &err,
            GraphError::ConflictingProduct { product, first_url, second_url }
                if product == "Shared"
                    && first_url == "https://example.com/a.git"
                    && second_url == "https://example.com/b.git"
        ));
        let message = err.to_string();
        assert!(message.contains("Shared"));
        assert!(message.contains("https://example.com/b.git"));
    }

    #[test]
    fn test_configuration_lists_default_to_release() {
        let catalog = build(&Inventory::default(), &[]);

        let lists: Vec<_> = catalog
            .objects_of(Isa::ConfigurationList)
            .filter_map(|(_, o)| match o {
                Object::ConfigurationList(list) => Some(list),
                _ => None,
            })
            .collect();
        assert_eq!(lists.len(), 2);
        for list in lists {
            assert_eq!(list.default_name, ConfigurationName::Release);
            assert_eq!(list.configurations.len(), 2);
        }
        assert_eq!(catalog.objects_of(Isa::BuildConfiguration).count(), 4);
    }

    #[test]
    fn test_validate_catches_dangling_reference() {
        let mut catalog = build(&Inventory::default(), &[]);
        let missing = ObjectId::from_key("file:missing.swift");
        let mut extra = Group::named("Extra");
        extra.children.push(missing);
        catalog
            .insert(ObjectId::from_key("group:extra"), Object::Group(extra))
            .unwrap();

        assert!(matches!(
            catalog.validate(),
            Err(GraphError::DanglingReference { to, .. }) if to == missing
        ));
    }

    #[test]
    fn test_validate_catches_unlisted_default() {
        let mut catalog = build(&Inventory::default(), &[]);
        catalog
            .insert(
                ObjectId::from_key("configlist:extra"),
                Object::ConfigurationList(ConfigurationList {
                    owner: ListOwner::Project("Extra".to_owned()),
                    configurations: vec![ObjectId::from_key("config:project:debug")],
                    default_name: ConfigurationName::Release,
                    default_visible: false,
                }),
            )
            .unwrap();

        assert!(matches!(
            catalog.validate(),
            Err(GraphError::InvalidDefaultConfiguration { .. })
        ));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let config = Config::default();
        let inv = inventory(&["S/a.swift", "S/b.swift"], &["R/x.png"]);

        let first = assemble(&config.project, &config.packages, &inv).unwrap();
        let second = assemble(&config.project, &config.packages, &inv).unwrap();

        let ids = |c: &Catalog| c.iter().map(|(id, _)| id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_large_inventory_has_no_collisions() {
        let sources: Vec<_> = (0..5_000)
            .map(|i| InputFile::new(format!("Sources/Gen/Module{}/File{i}.swift", i % 50)))
            .collect();
        let resources: Vec<_> = (0..1_000)
            .map(|i| InputFile::new(format!("Resources/Asset{i}.png")))
            .collect();
        let inv = Inventory { sources, resources };

        let catalog = build(&inv, &[]);
        assert_eq!(catalog.objects_of(Isa::BuildFile).count(), 6_000);
        // product, entitlements, Info descriptor
        assert_eq!(catalog.objects_of(Isa::FileReference).count(), 6_003);
    }
}
