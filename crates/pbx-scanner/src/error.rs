//! Error types for the pbx-scanner crate.

use camino::Utf8PathBuf;

/// Errors that can occur while enumerating project files.
///
/// Every variant stops the scan; a partial file list would produce a
/// project that silently omits files.
///
/// # Examples
///
/// ```
/// use pbx_scanner::ScanError;
///
/// fn describe(err: &ScanError) -> String {
///     match err {
///         ScanError::Walk(e) => format!("walk error: {e}"),
///         ScanError::Config(msg) => format!("config error: {msg}"),
///         ScanError::NonUtf8Path(p) => format!("invalid path: {}", p.display()),
///         ScanError::OutsideRoot { path, .. } => format!("outside root: {path}"),
///     }
/// }
///
/// assert_eq!(describe(&ScanError::config("missing")), "config error: missing");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Failed to walk a directory.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Invalid scanner configuration, such as a missing source directory.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A path is not valid UTF-8.
    ///
    /// Paths end up in the project file, which is UTF-8 text.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// A discovered file does not live under the project root.
    ///
    /// Happens when a symbolic link is followed out of the tree.
    #[error("{path} is outside the project root {root}")]
    OutsideRoot {
        /// The offending file.
        path: Utf8PathBuf,
        /// The project root.
        root: Utf8PathBuf,
    },
}

impl ScanError {
    /// Creates a new [`ScanError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a new [`ScanError::OutsideRoot`] error.
    #[inline]
    pub fn outside_root(path: impl Into<Utf8PathBuf>, root: impl Into<Utf8PathBuf>) -> Self {
        Self::OutsideRoot {
            path: path.into(),
            root: root.into(),
        }
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::OutsideRoot { path, .. } => Some(path),
            Self::Walk(_) | Self::Config(_) | Self::NonUtf8Path(_) => None,
        }
    }
}
