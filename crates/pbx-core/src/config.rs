//! Configuration structures for pbxgen.
//!
//! - [`ProjectConfig`] - identifying strings and fixed settings of the app
//! - [`ToolsConfig`] - Xcode version stamps written into the project
//! - [`ScanConfig`] - where the enumerator looks for inputs
//! - [`PackageDependency`] - one remote Swift package product
//! - [`Config`] - root configuration combining all settings
//!
//! All configuration types implement [`Default`] with the values of the
//! VoiceMemo app layout. A JSON file may override any subset of fields.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::types::FileType;

/// File name of the generated descriptor inside the `.xcodeproj` bundle.
pub const PROJECT_FILE_NAME: &str = "project.pbxproj";

/// Identifying strings and fixed settings of the generated project.
///
/// # Examples
///
/// ```
/// use pbx_core::ProjectConfig;
///
/// let config = ProjectConfig::default();
/// assert_eq!(config.name, "VoiceMemo");
/// assert_eq!(config.bundle_name(), "VoiceMemo.xcodeproj");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project and target name.
    pub name: String,

    /// `PRODUCT_BUNDLE_IDENTIFIER` of the target.
    pub bundle_identifier: String,

    /// Info descriptor, relative to the project root.
    pub info_plist_path: Utf8PathBuf,

    /// Entitlements descriptor, relative to the project root.
    pub entitlements_path: Utf8PathBuf,

    /// `MACOSX_DEPLOYMENT_TARGET`.
    pub deployment_target: String,

    /// `SWIFT_VERSION`.
    pub swift_version: String,

    /// `MARKETING_VERSION`.
    pub marketing_version: String,

    /// `CURRENT_PROJECT_VERSION`.
    pub current_project_version: String,

    /// `DEVELOPMENT_TEAM`; empty means unsigned.
    pub development_team: String,

    /// `ASSETCATALOG_COMPILER_APPICON_NAME`.
    pub app_icon_name: String,

    /// `ASSETCATALOG_COMPILER_GLOBAL_ACCENT_COLOR_NAME`.
    pub accent_color_name: String,

    /// Xcode version stamps.
    pub tools: ToolsConfig,
}

impl ProjectConfig {
    /// Directory name of the project bundle, `<name>.xcodeproj`.
    #[must_use]
    pub fn bundle_name(&self) -> String {
        format!("{}.xcodeproj", self.name)
    }

    /// File name of the built application, `<name>.app`.
    #[must_use]
    pub fn product_file_name(&self) -> String {
        format!("{}.app", self.name)
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "VoiceMemo".to_owned(),
            bundle_identifier: "cn.mistbit.voicememo".to_owned(),
            info_plist_path: Utf8PathBuf::from("Sources/VoiceMemo/Info.plist"),
            entitlements_path: Utf8PathBuf::from("VoiceMemo.entitlements"),
            deployment_target: "13.0".to_owned(),
            swift_version: "5.0".to_owned(),
            marketing_version: "1.0".to_owned(),
            current_project_version: "1".to_owned(),
            development_team: String::new(),
            app_icon_name: "AppIcon".to_owned(),
            accent_color_name: "AccentColor".to_owned(),
            tools: ToolsConfig::default(),
        }
    }
}

/// Xcode version stamps recorded in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// `objectVersion` in the file header.
    pub object_version: u32,

    /// `LastUpgradeCheck` and `LastSwiftUpdateCheck`.
    pub last_upgrade_check: String,

    /// `CreatedOnToolsVersion` of the target.
    pub created_on_tools_version: String,

    /// `compatibilityVersion` of the project.
    pub compatibility_version: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            object_version: 54,
            last_upgrade_check: "1420".to_owned(),
            created_on_tools_version: "14.2".to_owned(),
            compatibility_version: "Xcode 14.0".to_owned(),
        }
    }
}

/// Configuration for the input enumerator.
///
/// # Examples
///
/// ```
/// use pbx_core::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert_eq!(config.sources_dir, "Sources/VoiceMemo");
/// assert_eq!(config.source_extensions, vec!["swift"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Project root; every other path is relative to it.
    pub root_path: Utf8PathBuf,

    /// Source tree, walked for files with a source extension.
    pub sources_dir: Utf8PathBuf,

    /// Resource tree, walked for all files. `None` disables resources.
    pub resources_dir: Option<Utf8PathBuf>,

    /// Extensions (without the dot) that mark a source file.
    pub source_extensions: Vec<String>,

    /// Directory names skipped during traversal.
    pub skip_dirs: Vec<String>,

    /// Whether to follow symbolic links.
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root_path: Utf8PathBuf::from("."),
            sources_dir: Utf8PathBuf::from("Sources/VoiceMemo"),
            resources_dir: Some(Utf8PathBuf::from("Sources/VoiceMemo/Resources")),
            source_extensions: vec!["swift".to_owned()],
            skip_dirs: vec![
                "build".to_owned(),
                ".build".to_owned(),
                "DerivedData".to_owned(),
                ".swiftpm".to_owned(),
            ],
            follow_links: false,
        }
    }
}

/// A product consumed from a remote Swift package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageDependency {
    /// Repository URL.
    pub url: String,

    /// Minimum version; the requirement is up to the next major.
    pub minimum_version: String,

    /// Product name linked into the target.
    pub product: String,
}

impl PackageDependency {
    /// Creates a dependency declaration.
    pub fn new(
        url: impl Into<String>,
        minimum_version: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            minimum_version: minimum_version.into(),
            product: product.into(),
        }
    }
}

/// The packages the VoiceMemo app depends on.
fn default_packages() -> Vec<PackageDependency> {
    vec![
        PackageDependency::new(
            "https://github.com/aliyun/alibabacloud-oss-swift-sdk-v2.git",
            "0.1.0-beta",
            "AlibabaCloudOSS",
        ),
        PackageDependency::new(
            "https://github.com/stephencelis/SQLite.swift.git",
            "0.14.1",
            "SQLite",
        ),
        PackageDependency::new("https://github.com/vapor/mysql-kit.git", "4.0.0", "MySQLKit"),
    ]
}

/// Root configuration for pbxgen.
///
/// # Examples
///
/// ```
/// use pbx_core::Config;
///
/// let config: Config = serde_json::from_str(r#"{"project": {"name": "Notes"}}"#)?;
/// assert_eq!(config.project.name, "Notes");
/// assert_eq!(config.packages.len(), 3);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project identity and settings.
    pub project: ProjectConfig,

    /// Input enumeration.
    pub scan: ScanConfig,

    /// Remote packages, in declaration order.
    pub packages: Vec<PackageDependency>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            scan: ScanConfig::default(),
            packages: default_packages(),
        }
    }
}

impl Config {
    /// Loads and validates a JSON configuration file.
    ///
    /// Fields missing from the file keep their defaults.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        debug!(%path, "loading configuration");
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the generated descriptor:
    /// `<root>/<name>.xcodeproj/project.pbxproj`.
    #[must_use]
    pub fn output_path(&self) -> Utf8PathBuf {
        self.scan
            .root_path
            .join(self.project.bundle_name())
            .join(PROJECT_FILE_NAME)
    }

    /// Checks values the generator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let project = &self.project;
        if project.name.trim().is_empty() {
            return Err(ConfigError::option("project.name", "must not be empty"));
        }
        if project.name.contains('/') {
            return Err(ConfigError::option("project.name", "must not contain '/'"));
        }
        if project.bundle_identifier.trim().is_empty() {
            return Err(ConfigError::option(
                "project.bundle_identifier",
                "must not be empty",
            ));
        }

        for path in [
            &project.info_plist_path,
            &project.entitlements_path,
            &self.scan.sources_dir,
        ] {
            require_relative(path)?;
        }
        if let Some(resources) = &self.scan.resources_dir {
            require_relative(resources)?;
        }

        if self.scan.source_extensions.is_empty() {
            return Err(ConfigError::option(
                "scan.source_extensions",
                "at least one extension is required",
            ));
        }
        if let Some(unknown) = self
            .scan
            .source_extensions
            .iter()
            .find(|ext| FileType::for_source(ext).is_none())
        {
            return Err(ConfigError::option(
                "scan.source_extensions",
                format!("'{unknown}' is not a known source extension"),
            ));
        }

        for (i, package) in self.packages.iter().enumerate() {
            for (field, value) in [
                ("url", &package.url),
                ("minimum_version", &package.minimum_version),
                ("product", &package.product),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::option(
                        format!("packages[{i}].{field}"),
                        "must not be empty",
                    ));
                }
            }
        }

        Ok(())
    }
}

fn require_relative(path: &Utf8Path) -> Result<(), ConfigError> {
    if path.is_absolute() || path.as_str().is_empty() {
        return Err(ConfigError::InvalidPath {
            path: path.to_owned(),
            reason: "must be a non-empty path relative to the project root".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_project_config_defaults() {
        let config = ProjectConfig::default();
        assert_eq!(config.bundle_identifier, "cn.mistbit.voicememo");
        assert_eq!(config.info_plist_path, "Sources/VoiceMemo/Info.plist");
        assert_eq!(config.entitlements_path, "VoiceMemo.entitlements");
        assert_eq!(config.product_file_name(), "VoiceMemo.app");
        assert_eq!(config.tools.object_version, 54);
    }

    #[test]
    fn test_default_packages() {
        let config = Config::default();
        let products: Vec<_> = config.packages.iter().map(|p| p.product.as_str()).collect();
        assert_eq!(products, vec!["AlibabaCloudOSS", "SQLite", "MySQLKit"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_path() {
        let mut config = Config::default();
        config.scan.root_path = Utf8PathBuf::from("/work/app");
        assert_eq!(
            config.output_path(),
            "/work/app/VoiceMemo.xcodeproj/project.pbxproj"
        );
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let json = r#"{"scan": {"resources_dir": null}, "packages": []}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.scan.resources_dir, None);
        assert!(config.packages.is_empty());
        assert_eq!(config.scan.sources_dir, "Sources/VoiceMemo");
        assert_eq!(config.project.name, "VoiceMemo");
    }

    #[test]
    fn test_validate_rejects_absolute_paths() {
        let mut config = Config::default();
        config.project.info_plist_path = Utf8PathBuf::from("/etc/Info.plist");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_extension() {
        let mut config = Config::default();
        config.scan.source_extensions = vec!["swift".to_owned(), "rs".to_owned()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'rs'"));
    }

    #[test]
    fn test_validate_rejects_empty_package_field() {
        let mut config = Config::default();
        config.packages.push(PackageDependency::new("https://example.com/x.git", "", "X"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("packages[3].minimum_version"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"project": {{"name": "Notes", "bundle_identifier": "com.example.notes"}}}}"#
        )
        .unwrap();

        let path = Utf8Path::from_path(file.path()).unwrap();
        let config = Config::load(path).unwrap();
        assert_eq!(config.project.name, "Notes");
        assert_eq!(config.project.bundle_identifier, "com.example.notes");
        assert_eq!(config.project.swift_version, "5.0");
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let path = Utf8Path::from_path(file.path()).unwrap();
        assert!(matches!(Config::load(path), Err(ConfigError::Parse(_))));
    }
}
