//! Error types for the pbx-core crate.
//!
//! - [`ConfigError`] - loading and validating a [`Config`](crate::Config)
//! - [`GraphError`] - identifier minting and graph invariant violations

use camino::Utf8PathBuf;

use crate::id::ObjectId;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use pbx_core::ConfigError;
///
/// let error = ConfigError::InvalidOption {
///     option: "project.name".to_owned(),
///     reason: "must not be empty".to_owned(),
/// };
/// assert!(error.to_string().contains("project.name"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The provided path is invalid or malformed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The invalid path.
        path: Utf8PathBuf,
        /// Explanation of why the path is invalid.
        reason: String,
    },

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while building or validating the object graph.
///
/// Apart from a conflicting package product, none of these occur for
/// well-formed input; they indicate an identifier collision or a bug in
/// assembly.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Two different keys produced the same truncated identifier.
    #[error("identifier {id} minted for both '{first}' and '{second}'")]
    IdentifierCollision {
        /// The shared identifier.
        id: ObjectId,
        /// The key that minted it first.
        first: String,
        /// The key that collided with it.
        second: String,
    },

    /// An object was inserted twice under the same identifier.
    #[error("object {0} is already defined")]
    DuplicateObject(ObjectId),

    /// Two package URLs declare a product with the same name.
    #[error("package product '{product}' is declared by both {first_url} and {second_url}")]
    ConflictingProduct {
        /// The product name.
        product: String,
        /// The URL that declared it first.
        first_url: String,
        /// The URL that declared it again.
        second_url: String,
    },

    /// An object refers to an identifier that is not defined.
    #[error("object {from} references undefined object {to}")]
    DanglingReference {
        /// The referring object.
        from: ObjectId,
        /// The missing target.
        to: ObjectId,
    },

    /// A configuration list's default is not one of its configurations.
    #[error("configuration list {list} defaults to '{name}', which it does not contain")]
    InvalidDefaultConfiguration {
        /// The configuration list.
        list: ObjectId,
        /// The default name it declares.
        name: String,
    },

    /// The designated root is missing or is not a project object.
    #[error("root object {0} is not a project")]
    InvalidRoot(ObjectId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let error = ConfigError::InvalidPath {
            path: Utf8PathBuf::from("/abs/Info.plist"),
            reason: "must be relative to the project root".to_owned(),
        };
        let msg = error.to_string();
        assert!(msg.contains("/abs/Info.plist"));
        assert!(msg.contains("relative"));
    }

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::option("packages[0].url", "must not be empty");
        let msg = error.to_string();
        assert!(msg.contains("packages[0].url"));
        assert!(msg.contains("must not be empty"));
    }

    #[test]
    fn test_dangling_reference_display() {
        let error = GraphError::DanglingReference {
            from: ObjectId::from_key("project"),
            to: ObjectId::from_key("group:main"),
        };
        assert_eq!(
            error.to_string(),
            "object 98F54143AB4E86B28C3AFEE0 references undefined object ADCF10F76EBF2A74473E9DC4"
        );
    }
}
