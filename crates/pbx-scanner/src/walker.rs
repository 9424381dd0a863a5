//! Directory traversal for project files.
//!
//! [`FileWalker`] uses the `ignore` crate to walk a directory.
//!
//! Ignore files and hidden-file rules are not consulted, so the result does
//! not depend on the machine's git configuration. Pruning is done by an
//! explicit skip list instead.
//!
//! # Features
//!
//! - Skips build output and tool state directories by name
//! - Skips Finder's `.DS_Store` files
//! - Optional extension filter
//! - Entries sorted by file name, so the order does not depend on the
//!   filesystem
//! - Converts paths to UTF-8 [`Utf8PathBuf`](camino::Utf8PathBuf)
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use pbx_scanner::FileWalker;
//!
//! let walker = FileWalker::new(Utf8Path::new("Sources/App"))?
//!     .with_extensions(&["swift".to_owned()]);
//! for path in walker.collect_paths()? {
//!     println!("Found: {path}");
//! }
//! # Ok::<(), pbx_scanner::ScanError>(())
//! ```

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;

use crate::error::ScanError;

/// Directories never descended into.
///
/// These hold build output or tool state, never project inputs.
const SKIP_DIRECTORIES: &[&str] = &["build", ".build", "DerivedData", ".git", ".swiftpm"];

/// Bundle-like directory suffixes that are skipped as a whole.
const SKIP_SUFFIXES: &[&str] = &[".xcodeproj", ".xcworkspace"];

/// Files never reported.
const SKIP_FILES: &[&str] = &[".DS_Store"];

/// Directory names excluded from a walk.
#[derive(Debug, Clone, Default)]
struct SkipList {
    extra: Vec<String>,
}

impl SkipList {
    fn contains(&self, name: &str) -> bool {
        SKIP_DIRECTORIES.contains(&name)
            || SKIP_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
            || self.extra.iter().any(|dir| dir == name)
    }
}

/// A file walker that discovers files in a directory tree.
///
/// Paths are returned in walk order: depth first, siblings sorted by file
/// name.
#[derive(Debug)]
pub struct FileWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
    /// Directories to skip.
    skip: SkipList,
    /// Lower-case extensions to keep; `None` keeps everything.
    extensions: Option<Vec<String>>,
    /// Whether to follow symbolic links.
    follow_links: bool,
}

impl FileWalker {
    /// Creates a new file walker for the given root directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the root path doesn't exist or
    /// isn't a directory.
    pub fn new(root: &Utf8Path) -> Result<Self, ScanError> {
        if !root.exists() {
            return Err(ScanError::config(format!(
                "root path does not exist: {root}"
            )));
        }
        if !root.is_dir() {
            return Err(ScanError::config(format!(
                "root path is not a directory: {root}"
            )));
        }

        Ok(Self {
            root: root.to_owned(),
            skip: SkipList::default(),
            extensions: None,
            follow_links: false,
        })
    }

    /// Adds directories to skip during traversal.
    ///
    /// These are in addition to the default skip list (`build`,
    /// `DerivedData`, etc.).
    #[must_use]
    pub fn with_skip_dirs(mut self, dirs: &[String]) -> Self {
        self.skip.extra.extend(dirs.iter().cloned());
        self
    }

    /// Keeps only files with one of the given extensions.
    ///
    /// Matching ignores case and a leading dot.
    #[must_use]
    pub fn with_extensions(mut self, extensions: &[String]) -> Self {
        self.extensions = Some(
            extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        );
        self
    }

    /// Configures whether to follow symbolic links.
    ///
    /// By default, symbolic links are not followed.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Collects all matching file paths in the directory tree.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] if directory traversal fails.
    /// Returns [`ScanError::NonUtf8Path`] if a non-UTF-8 path is encountered.
    pub fn collect_paths(&self) -> Result<Vec<Utf8PathBuf>, ScanError> {
        let mut paths = Vec::new();

        for result in self.build_walker() {
            let entry = result?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            if SKIP_FILES.iter().any(|name| entry.file_name() == *name) {
                continue;
            }

            let path = entry.path();
            let utf8_path =
                Utf8Path::from_path(path).ok_or_else(|| ScanError::NonUtf8Path(path.to_owned()))?;

            if !self.matches_extension(utf8_path) {
                continue;
            }

            paths.push(utf8_path.to_owned());
        }

        Ok(paths)
    }

    /// Builds the ignore walker with configured settings.
    fn build_walker(&self) -> ignore::Walk {
        let skip = Arc::new(self.skip.clone());

        WalkBuilder::new(&self.root)
            // Every file counts, whatever the local git configuration says
            .standard_filters(false)
            .follow_links(self.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                let name = entry.file_name().to_str().unwrap_or_default();
                entry.depth() == 0 || !is_dir || !skip.contains(name)
            })
            .build()
    }

    /// Checks a path against the extension filter.
    fn matches_extension(&self, path: &Utf8Path) -> bool {
        let Some(extensions) = &self.extensions else {
            return true;
        };
        path.extension()
            .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn utf8_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    fn touch(root: &Utf8Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_skip_list() {
        let skip = SkipList {
            extra: vec!["Generated".to_owned()],
        };
        assert!(skip.contains("build"));
        assert!(skip.contains("DerivedData"));
        assert!(skip.contains("VoiceMemo.xcodeproj"));
        assert!(skip.contains("Generated"));
        assert!(!skip.contains("Views"));
        assert!(!skip.contains("builder"));
    }

    #[test]
    fn test_extension_filter() {
        let walker = FileWalker {
            root: Utf8PathBuf::from("."),
            skip: SkipList::default(),
            extensions: None,
            follow_links: false,
        }
        .with_extensions(&[".Swift".to_owned(), "m".to_owned()]);

        assert!(walker.matches_extension(Utf8Path::new("App.swift")));
        assert!(walker.matches_extension(Utf8Path::new("Legacy/Bridge.M")));
        assert!(!walker.matches_extension(Utf8Path::new("Info.plist")));
        assert!(!walker.matches_extension(Utf8Path::new("Makefile")));
    }

    #[test]
    fn test_new_rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        let err = FileWalker::new(&root.join("missing")).unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));

        touch(&root, "file.txt");
        let err = FileWalker::new(&root.join("file.txt")).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_collect_paths_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        for file in [
            "b.swift",
            "a.swift",
            "Views/Z.swift",
            "Views/A.swift",
            "notes.md",
            ".hidden.swift",
            ".DS_Store",
            "build/Out.swift",
            "App.xcodeproj/Inner.swift",
            "Generated/Gen.swift",
        ] {
            touch(&root, file);
        }

        let walker = FileWalker::new(&root)
            .unwrap()
            .with_extensions(&["swift".to_owned()])
            .with_skip_dirs(&["Generated".to_owned()]);
        let relative: Vec<_> = walker
            .collect_paths()
            .unwrap()
            .into_iter()
            .map(|path| path.strip_prefix(&root).unwrap().to_string())
            .collect();

        assert_eq!(
            relative,
            [".hidden.swift", "Views/A.swift", "Views/Z.swift", "a.swift", "b.swift"]
        );
    }

    #[test]
    fn test_collect_paths_ignores_gitignore_and_hidden_rules() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".gitignore"), "*.jpg\n.config/\n").unwrap();
        fs::write(root.join(".ignore"), "*.png\n").unwrap();
        touch(&root, "img/cover.jpg");
        touch(&root, "img/icon.png");
        touch(&root, ".config/settings.json");
        touch(&root, "img/.DS_Store");

        let relative: Vec<_> = FileWalker::new(&root)
            .unwrap()
            .collect_paths()
            .unwrap()
            .into_iter()
            .map(|path| path.strip_prefix(&root).unwrap().to_string())
            .collect();

        assert_eq!(
            relative,
            [
                ".config/settings.json",
                ".gitignore",
                ".ignore",
                "img/cover.jpg",
                "img/icon.png",
            ]
        );
    }
}
