//! Fixed build settings for the project and target configurations.

use crate::config::ProjectConfig;
use crate::types::{BuildSettings, ConfigurationName, SettingValue};

/// Settings shared by the project-scope Debug and Release configurations.
const PROJECT_COMMON: &[(&str, &str)] = &[
    ("ALWAYS_SEARCH_USER_PATHS", "NO"),
    ("CLANG_ANALYZER_NONNULL", "YES"),
    ("CLANG_ANALYZER_NUMBER_OBJECT_CONVERSION", "YES_AGGRESSIVE"),
    ("CLANG_CXX_LANGUAGE_STANDARD", "gnu++20"),
    ("CLANG_ENABLE_MODULES", "YES"),
    ("CLANG_ENABLE_OBJC_ARC", "YES"),
    ("CLANG_ENABLE_OBJC_WEAK", "YES"),
    ("CLANG_WARN_BLOCK_CAPTURE_AUTORELEASING", "YES"),
    ("CLANG_WARN_BOOL_CONVERSION", "YES"),
    ("CLANG_WARN_COMMA", "YES"),
    ("CLANG_WARN_CONSTANT_CONVERSION", "YES"),
    ("CLANG_WARN_DEPRECATED_OBJC_IMPLEMENTATIONS", "YES"),
    ("CLANG_WARN_DIRECT_OBJC_ISA_USAGE", "YES_ERROR"),
    ("CLANG_WARN_DOCUMENTATION_COMMENTS", "YES"),
    ("CLANG_WARN_EMPTY_BODY", "YES"),
    ("CLANG_WARN_ENUM_CONVERSION", "YES"),
    ("CLANG_WARN_INFINITE_RECURSION", "YES"),
    ("CLANG_WARN_INT_CONVERSION", "YES"),
    ("CLANG_WARN_NON_LITERAL_NULL_CONVERSION", "YES"),
    ("CLANG_WARN_OBJC_IMPLICIT_RETAIN_SELF", "YES"),
    ("CLANG_WARN_OBJC_LITERAL_CONVERSION", "YES"),
    ("CLANG_WARN_OBJC_ROOT_CLASS", "YES_ERROR"),
    ("CLANG_WARN_QUOTED_INCLUDE_IN_FRAMEWORK_HEADER", "YES"),
    ("CLANG_WARN_RANGE_LOOP_ANALYSIS", "YES"),
    ("CLANG_WARN_STRICT_PROTOTYPES", "YES"),
    ("CLANG_WARN_SUSPICIOUS_MOVE", "YES"),
    ("CLANG_WARN_UNGUARDED_AVAILABILITY", "YES_AGGRESSIVE"),
    ("CLANG_WARN_UNREACHABLE_CODE", "YES"),
    ("CLANG_WARN__DUPLICATE_METHOD_MATCH", "YES"),
    ("COPY_PHASE_STRIP", "NO"),
    ("ENABLE_STRICT_OBJC_MSGSEND", "YES"),
    ("GCC_C_LANGUAGE_STANDARD", "gnu11"),
    ("GCC_NO_COMMON_BLOCKS", "YES"),
    ("GCC_WARN_64_TO_32_BIT_CONVERSION", "YES"),
    ("GCC_WARN_ABOUT_RETURN_TYPE", "YES_ERROR"),
    ("GCC_WARN_UNDECLARED_SELECTOR", "YES"),
    ("GCC_WARN_UNINITIALIZED_AUTOS", "YES_AGGRESSIVE"),
    ("GCC_WARN_UNUSED_FUNCTION", "YES"),
    ("GCC_WARN_UNUSED_VARIABLE", "YES"),
    ("MTL_FAST_MATH", "YES"),
    ("SDKROOT", "macosx"),
];

const PROJECT_DEBUG: &[(&str, &str)] = &[
    ("DEBUG_INFORMATION_FORMAT", "dwarf"),
    ("ENABLE_TESTABILITY", "YES"),
    ("GCC_DYNAMIC_NO_PIC", "NO"),
    ("GCC_OPTIMIZATION_LEVEL", "0"),
    ("MTL_ENABLE_DEBUG_INFO", "INCLUDE_SOURCE"),
    ("ONLY_ACTIVE_ARCH", "YES"),
    ("SWIFT_ACTIVE_COMPILATION_CONDITIONS", "DEBUG"),
    ("SWIFT_OPTIMIZATION_LEVEL", "-Onone"),
];

const PROJECT_RELEASE: &[(&str, &str)] = &[
    ("DEBUG_INFORMATION_FORMAT", "dwarf-with-dsym"),
    ("ENABLE_NS_ASSERTIONS", "NO"),
    ("MTL_ENABLE_DEBUG_INFO", "NO"),
    ("SWIFT_COMPILATION_MODE", "wholemodule"),
    ("SWIFT_OPTIMIZATION_LEVEL", "-O"),
];

const DEBUG_PREPROCESSOR_DEFINITIONS: &[&str] = &["DEBUG=1", "$(inherited)"];

const RUNPATH_SEARCH_PATHS: &[&str] = &["$(inherited)", "@executable_path/../Frameworks"];

fn insert_all(settings: &mut BuildSettings, table: &[(&str, &str)]) {
    for (key, value) in table {
        settings.insert((*key).to_owned(), SettingValue::from(*value));
    }
}

/// Settings of a project-scope configuration.
///
/// # Examples
///
/// ```
/// use pbx_core::{ConfigurationName, ProjectConfig, SettingValue, project_settings};
///
/// let debug = project_settings(&ProjectConfig::default(), ConfigurationName::Debug);
/// assert_eq!(debug["SWIFT_OPTIMIZATION_LEVEL"], SettingValue::from("-Onone"));
/// assert_eq!(debug["MACOSX_DEPLOYMENT_TARGET"], SettingValue::from("13.0"));
/// ```
#[must_use]
pub fn project_settings(project: &ProjectConfig, name: ConfigurationName) -> BuildSettings {
    let mut settings = BuildSettings::new();
    insert_all(&mut settings, PROJECT_COMMON);
    settings.insert(
        "MACOSX_DEPLOYMENT_TARGET".to_owned(),
        SettingValue::from(project.deployment_target.as_str()),
    );

    match name {
        ConfigurationName::Debug => {
            insert_all(&mut settings, PROJECT_DEBUG);
            settings.insert(
                "GCC_PREPROCESSOR_DEFINITIONS".to_owned(),
                SettingValue::from(DEBUG_PREPROCESSOR_DEFINITIONS),
            );
        }
        ConfigurationName::Release => insert_all(&mut settings, PROJECT_RELEASE),
    }

    settings
}

/// Settings of a target-scope configuration.
///
/// Debug and Release are identical at target scope; the parameter keeps
/// the call sites symmetric with [`project_settings`].
#[must_use]
pub fn target_settings(project: &ProjectConfig, _name: ConfigurationName) -> BuildSettings {
    let mut settings = BuildSettings::new();
    let text = |value: &str| SettingValue::from(value);

    for (key, value) in [
        ("ASSETCATALOG_COMPILER_APPICON_NAME", text(&project.app_icon_name)),
        (
            "ASSETCATALOG_COMPILER_GLOBAL_ACCENT_COLOR_NAME",
            text(&project.accent_color_name),
        ),
        ("CODE_SIGN_ENTITLEMENTS", text(project.entitlements_path.as_str())),
        ("CODE_SIGN_STYLE", text("Automatic")),
        ("COMBINE_HIDPI_IMAGES", text("YES")),
        ("CURRENT_PROJECT_VERSION", text(&project.current_project_version)),
        ("DEVELOPMENT_TEAM", text(&project.development_team)),
        ("ENABLE_HARDENED_RUNTIME", text("YES")),
        ("GENERATE_INFOPLIST_FILE", text("NO")),
        ("INFOPLIST_FILE", text(project.info_plist_path.as_str())),
        ("LD_RUNPATH_SEARCH_PATHS", SettingValue::from(RUNPATH_SEARCH_PATHS)),
        ("MARKETING_VERSION", text(&project.marketing_version)),
        ("PRODUCT_BUNDLE_IDENTIFIER", text(&project.bundle_identifier)),
        ("PRODUCT_NAME", text("$(TARGET_NAME)")),
        ("SWIFT_EMIT_LOC_STRINGS", text("YES")),
        ("SWIFT_VERSION", text(&project.swift_version)),
    ] {
        settings.insert(key.to_owned(), value);
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_release_differ_only_where_expected() {
        let project = ProjectConfig::default();
        let debug = project_settings(&project, ConfigurationName::Debug);
        let release = project_settings(&project, ConfigurationName::Release);

        assert_eq!(debug.len(), PROJECT_COMMON.len() + PROJECT_DEBUG.len() + 2);
        assert_eq!(release.len(), PROJECT_COMMON.len() + PROJECT_RELEASE.len() + 1);
        assert_eq!(
            release["DEBUG_INFORMATION_FORMAT"],
            SettingValue::from("dwarf-with-dsym")
        );
        assert!(!release.contains_key("GCC_PREPROCESSOR_DEFINITIONS"));
        assert_eq!(
            debug["GCC_PREPROCESSOR_DEFINITIONS"],
            SettingValue::from(DEBUG_PREPROCESSOR_DEFINITIONS)
        );
    }

    #[test]
    fn test_tables_have_no_duplicate_keys() {
        for table in [PROJECT_COMMON, PROJECT_DEBUG, PROJECT_RELEASE] {
            let mut keys: Vec<_> = table.iter().map(|(k, _)| *k).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), table.len());
        }
    }

    #[test]
    fn test_target_settings_follow_project_config() {
        let mut project = ProjectConfig::default();
        project.bundle_identifier = "com.example.notes".to_owned();
        project.development_team = "ABCDE12345".to_owned();

        let settings = target_settings(&project, ConfigurationName::Release);
        assert_eq!(
            settings["PRODUCT_BUNDLE_IDENTIFIER"],
            SettingValue::from("com.example.notes")
        );
        assert_eq!(settings["DEVELOPMENT_TEAM"], SettingValue::from("ABCDE12345"));
        assert_eq!(
            settings["INFOPLIST_FILE"],
            SettingValue::from("Sources/VoiceMemo/Info.plist")
        );
        assert_eq!(
            target_settings(&project, ConfigurationName::Debug),
            settings
        );
    }
}
