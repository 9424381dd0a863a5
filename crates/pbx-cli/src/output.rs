//! Writing and checking the generated project file.

use std::fs;
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::NamedTempFile;

/// Mode requested for a new project file, before the umask applies.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o666;

/// Errors from reading or replacing the project file.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The bundle directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing the temporary file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Final destination of the write.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The temporary file could not be moved into place.
    #[error("failed to replace {path}: {source}")]
    Rename {
        /// Final destination of the rename.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The existing file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    fn write(path: &Utf8Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_owned(),
            source,
        }
    }
}

/// How the file on disk relates to freshly generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Byte-identical.
    Current,
    /// Present but different.
    Stale,
    /// Not there at all.
    Missing,
}

/// Compares the file at `path` with `contents`, byte for byte.
pub fn compare(path: &Utf8Path, contents: &str) -> Result<Freshness, WriteError> {
    match fs::read(path) {
        Ok(existing) if existing == contents.as_bytes() => Ok(Freshness::Current),
        Ok(_) => Ok(Freshness::Stale),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Freshness::Missing),
        Err(source) => Err(WriteError::Read {
            path: path.to_owned(),
            source,
        }),
    }
}

/// Replaces the file at `path` with `contents`.
///
/// The text is written to a temporary file in the same directory, flushed,
/// and renamed over `path`. Readers see either the old file or the new
/// one, never a partial write. Missing parent directories are created.
/// An existing file keeps its permissions; a new one gets the usual
/// umask-derived mode.
pub fn write_project(path: &Utf8Path, contents: &str) -> Result<(), WriteError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
        path: dir.to_owned(),
        source,
    })?;

    let mut file = temp_file_in(dir).map_err(|e| WriteError::write(path, e))?;
    if let Ok(metadata) = fs::metadata(path) {
        file.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| WriteError::write(path, e))?;
    }
    file.write_all(contents.as_bytes())
        .map_err(|e| WriteError::write(path, e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| WriteError::write(path, e))?;

    file.persist(path).map_err(|err| WriteError::Rename {
        path: path.to_owned(),
        source: err.error,
    })?;
    Ok(())
}

/// Creates the temporary file next to the destination.
///
/// `tempfile` defaults to owner-only access, which would survive the rename.
fn temp_file_in(dir: &Utf8Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".project.pbxproj.");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(NEW_FILE_MODE));
    }
    builder.tempfile_in(dir)
}
