//! File discovery for generated Xcode projects.
//!
//! This crate walks an app's source tree and produces the [`Inventory`] the
//! graph assembler consumes: compiled sources and bundled resources, with
//! paths relative to the project root and in a stable order.
//!
//! # Overview
//!
//! - [`FileWalker`]: directory traversal with a fixed skip list
//! - [`enumerate`]: applies a [`ScanConfig`] and builds the inventory
//!
//! # Example
//!
//! ```no_run
//! use pbx_core::ScanConfig;
//!
//! let inventory = pbx_scanner::enumerate(&ScanConfig::default())?;
//! println!("{} sources, {} resources", inventory.sources.len(), inventory.resources.len());
//! # Ok::<(), pbx_scanner::ScanError>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod walker;

use camino::{Utf8Path, Utf8PathBuf};
use pbx_core::{InputFile, Inventory, ScanConfig};
use tracing::{debug, info};

pub use error::ScanError;
pub use walker::FileWalker;

/// Discovers the sources and resources described by `config`.
///
/// Sources are the files under `sources_dir` whose extension is listed in
/// `source_extensions`. Resources are every file under `resources_dir`,
/// recursively; a missing resources directory yields no resources.
///
/// # Errors
///
/// Returns [`ScanError::Config`] if the project root or the source
/// directory is missing, and propagates walk failures.
pub fn enumerate(config: &ScanConfig) -> Result<Inventory, ScanError> {
    let root = config.root_path.as_path();
    if !root.is_dir() {
        return Err(ScanError::config(format!(
            "project root is not a directory: {root}"
        )));
    }

    info!(root = %root, "Enumerating project files");

    let sources_dir = root.join(&config.sources_dir);
    if !sources_dir.is_dir() {
        return Err(ScanError::config(format!(
            "source directory does not exist: {sources_dir}"
        )));
    }
    let sources = FileWalker::new(&sources_dir)?
        .with_extensions(&config.source_extensions)
        .with_skip_dirs(&config.skip_dirs)
        .with_follow_links(config.follow_links)
        .collect_paths()?;

    let resources = match &config.resources_dir {
        Some(dir) if root.join(dir).is_dir() => FileWalker::new(&root.join(dir))?
            .with_skip_dirs(&config.skip_dirs)
            .with_follow_links(config.follow_links)
            .collect_paths()?,
        Some(dir) => {
            debug!(dir = %dir, "Resources directory not found, skipping");
            Vec::new()
        }
        None => Vec::new(),
    };

    let inventory = Inventory {
        sources: relative_inputs(root, sources)?,
        resources: relative_inputs(root, resources)?,
    };

    info!(
        sources = inventory.sources.len(),
        resources = inventory.resources.len(),
        "Enumerated project files"
    );

    Ok(inventory)
}

/// Rewrites walker paths relative to the project root.
fn relative_inputs(root: &Utf8Path, paths: Vec<Utf8PathBuf>) -> Result<Vec<InputFile>, ScanError> {
    paths
        .into_iter()
        .map(|path| {
            let relative = path
                .strip_prefix(root)
                .map_err(|_| ScanError::outside_root(&path, root))?;
            Ok(InputFile::new(relative))
        })
        .collect()
}
