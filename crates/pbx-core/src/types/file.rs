//! File inputs and file reference objects.
//!
//! [`InputFile`] and [`Inventory`] are what the enumerator hands to the
//! assembler; [`FileReference`] is the `PBXFileReference` object built from
//! them.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// A file discovered on disk, before it becomes part of the graph.
///
/// # Examples
///
/// ```
/// use pbx_core::InputFile;
///
/// let file = InputFile::new("Sources/App/Views/Main.swift");
/// assert_eq!(file.name, "Main.swift");
/// assert_eq!(file.path, "Sources/App/Views/Main.swift");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFile {
    /// Display name (the final path component).
    pub name: String,

    /// Path relative to the project root.
    pub path: Utf8PathBuf,
}

impl InputFile {
    /// Creates an input file, taking the display name from the path.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        let path = path.into();
        let name = path.file_name().unwrap_or(path.as_str()).to_owned();
        Self { name, path }
    }
}

/// Everything the enumerator discovered, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Source files compiled by the target.
    pub sources: Vec<InputFile>,

    /// Resource files copied into the bundle.
    pub resources: Vec<InputFile>,
}

impl Inventory {
    /// Total number of discovered files.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len() + self.resources.len()
    }

    /// Returns `true` if nothing was discovered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.resources.is_empty()
    }
}

/// The content type Xcode records for a file reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FileType {
    /// Swift source.
    Swift,
    /// Objective-C source.
    ObjC,
    /// Objective-C++ source.
    ObjCpp,
    /// C source.
    C,
    /// C++ source.
    Cpp,
    /// C family header.
    Header,
    /// XML property list (the Info descriptor).
    PlistXml,
    /// Code signing entitlements.
    Entitlements,
    /// Icon image.
    Icns,
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// Anything Xcode treats as an opaque file.
    Generic,
    /// The built application bundle.
    Application,
}

impl FileType {
    /// Returns the Xcode file type identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Swift => "sourcecode.swift",
            Self::ObjC => "sourcecode.c.objc",
            Self::ObjCpp => "sourcecode.cpp.objcpp",
            Self::C => "sourcecode.c.c",
            Self::Cpp => "sourcecode.cpp.cpp",
            Self::Header => "sourcecode.c.h",
            Self::PlistXml => "text.plist.xml",
            Self::Entitlements => "text.plist.entitlements",
            Self::Icns => "image.icns",
            Self::Png => "image.png",
            Self::Jpeg => "image.jpeg",
            Self::Generic => "file",
            Self::Application => "wrapper.application",
        }
    }

    /// Maps a source file extension to its type.
    ///
    /// Returns `None` for extensions that are not compiled.
    ///
    /// # Examples
    ///
    /// ```
    /// use pbx_core::FileType;
    ///
    /// assert_eq!(FileType::for_source("swift"), Some(FileType::Swift));
    /// assert_eq!(FileType::for_source("plist"), None);
    /// ```
    #[must_use]
    pub fn for_source(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "swift" => Some(Self::Swift),
            "m" => Some(Self::ObjC),
            "mm" => Some(Self::ObjCpp),
            "c" => Some(Self::C),
            "cpp" | "cc" | "cxx" => Some(Self::Cpp),
            "h" | "hpp" => Some(Self::Header),
            _ => None,
        }
    }

    /// Infers the type of a resource from its extension.
    ///
    /// Matching is case-insensitive; unknown extensions map to
    /// [`FileType::Generic`].
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use pbx_core::FileType;
    ///
    /// assert_eq!(FileType::for_resource(Utf8Path::new("icon.icns")), FileType::Icns);
    /// assert_eq!(FileType::for_resource(Utf8Path::new("PHOTO.JPG")), FileType::Jpeg);
    /// assert_eq!(FileType::for_resource(Utf8Path::new("data.bin")), FileType::Generic);
    /// ```
    #[must_use]
    pub fn for_resource(path: &Utf8Path) -> Self {
        let extension = path.extension().map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("icns") => Self::Icns,
            Some("png") => Self::Png,
            Some("jpg" | "jpeg") => Self::Jpeg,
            _ => Self::Generic,
        }
    }

    /// Returns `true` if the type is recorded as `explicitFileType`.
    ///
    /// Build products carry an explicit type and are excluded from the
    /// index; everything else records `lastKnownFileType`.
    #[inline]
    #[must_use]
    pub const fn is_explicit(self) -> bool {
        matches!(self, Self::Application)
    }
}

/// The location a reference's path is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceTree {
    /// Relative to the enclosing group.
    #[default]
    Group,
    /// Relative to the build products directory.
    BuiltProductsDir,
}

impl SourceTree {
    /// Returns the value written for `sourceTree`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "<group>",
            Self::BuiltProductsDir => "BUILT_PRODUCTS_DIR",
        }
    }
}

/// A `PBXFileReference`: one file known to the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    /// Display name used in comments.
    pub name: String,
    /// Path written to the `path` field.
    pub path: Utf8PathBuf,
    /// Declared content type.
    pub file_type: FileType,
    /// What `path` is relative to.
    pub source_tree: SourceTree,
}

impl FileReference {
    /// Creates a group-relative reference for a discovered file.
    #[must_use]
    pub fn from_input(input: &InputFile, file_type: FileType) -> Self {
        Self {
            name: input.name.clone(),
            path: input.path.clone(),
            file_type,
            source_tree: SourceTree::Group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_file_without_directory() {
        let file = InputFile::new("App.swift");
        assert_eq!(file.name, "App.swift");
    }

    #[test]
    fn test_resource_type_mapping() {
        let cases = [
            ("Resources/icon.icns", FileType::Icns),
            ("Resources/logo.png", FileType::Png),
            ("Resources/photo.jpg", FileType::Jpeg),
            ("Resources/photo.jpeg", FileType::Jpeg),
            ("Resources/data.bin", FileType::Generic),
            ("Resources/LICENSE", FileType::Generic),
        ];
        for (path, expected) in cases {
            assert_eq!(FileType::for_resource(Utf8Path::new(path)), expected, "{path}");
        }
    }

    #[test]
    fn test_type_identifiers() {
        assert_eq!(FileType::Icns.as_str(), "image.icns");
        assert_eq!(FileType::Jpeg.as_str(), "image.jpeg");
        assert_eq!(FileType::Generic.as_str(), "file");
        assert_eq!(FileType::Swift.as_str(), "sourcecode.swift");
    }

    #[test]
    fn test_only_products_are_explicit() {
        assert!(FileType::Application.is_explicit());
        assert!(!FileType::Swift.is_explicit());
        assert!(!FileType::Generic.is_explicit());
    }

    #[test]
    fn test_inventory_len() {
        let inventory = Inventory {
            sources: vec![InputFile::new("a.swift"), InputFile::new("b.swift")],
            resources: vec![InputFile::new("c.png")],
        };
        assert_eq!(inventory.len(), 3);
        assert!(!inventory.is_empty());
        assert!(Inventory::default().is_empty());
    }
}
