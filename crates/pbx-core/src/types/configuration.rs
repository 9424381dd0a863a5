//! Build configurations and configuration lists.

use std::collections::BTreeMap;

use crate::id::ObjectId;

/// Name of a build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigurationName {
    /// Unoptimized development build.
    Debug,
    /// Optimized distribution build.
    Release,
}

impl ConfigurationName {
    /// Both variants, in the order they are listed.
    pub const ALL: [Self; 2] = [Self::Debug, Self::Release];

    /// Returns the configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }

    /// Lower-case form used in identifier keys.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

/// A build setting value: a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// A scalar value.
    Text(String),
    /// An ordered list, e.g. search paths.
    List(Vec<String>),
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&[&str]> for SettingValue {
    fn from(values: &[&str]) -> Self {
        Self::List(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

/// Build settings, kept in key order the way Xcode writes them.
pub type BuildSettings = BTreeMap<String, SettingValue>;

/// An `XCBuildConfiguration`: one named settings bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    /// Debug or Release.
    pub name: ConfigurationName,
    /// The settings map.
    pub settings: BuildSettings,
}

/// The object a configuration list belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOwner {
    /// The project, by name.
    Project(String),
    /// A native target, by name.
    Target(String),
}

impl ListOwner {
    /// Comment label Xcode writes for the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use pbx_core::ListOwner;
    ///
    /// assert_eq!(
    ///     ListOwner::Target("VoiceMemo".to_owned()).label(),
    ///     r#"Build configuration list for PBXNativeTarget "VoiceMemo""#
    /// );
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        let (isa, name) = match self {
            Self::Project(name) => ("PBXProject", name),
            Self::Target(name) => ("PBXNativeTarget", name),
        };
        format!("Build configuration list for {isa} \"{name}\"")
    }
}

/// An `XCConfigurationList`: the configurations of one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationList {
    /// Project or target this list belongs to.
    pub owner: ListOwner,
    /// Configurations, Debug first.
    pub configurations: Vec<ObjectId>,
    /// Configuration used when none is specified.
    pub default_name: ConfigurationName,
    /// `defaultConfigurationIsVisible`.
    pub default_visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_value_conversions() {
        assert_eq!(SettingValue::from("YES"), SettingValue::Text("YES".to_owned()));
        let list: &[&str] = &["$(inherited)", "DEBUG=1"];
        assert_eq!(
            SettingValue::from(list),
            SettingValue::List(vec!["$(inherited)".to_owned(), "DEBUG=1".to_owned()])
        );
    }

    #[test]
    fn test_project_list_label() {
        assert_eq!(
            ListOwner::Project("Demo".to_owned()).label(),
            "Build configuration list for PBXProject \"Demo\""
        );
    }
}
