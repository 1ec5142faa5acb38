//! Discovery of scene documents and images under a scenes root.
//!
//! # Example
//!
//! ```ignore
//! use scenesync::discovery::{discover, ScanKind};
//!
//! let docs = discover("./scenes", ScanKind::Documents, &config)?;
//! println!("Found {} documents", docs.len());
//! ```

mod scanner;

use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::error::{Result, SyncError};

pub use scanner::{scan_directory, ScanKind, PORTRAITS_DIR};

/// Discover files of `kind` under `root`.
///
/// A missing root (or `Portraits/` folder, for portrait documents) is the one
/// fatal condition of a run and is reported before any work begins. An
/// existing but empty directory yields an empty list.
pub fn discover(root: impl AsRef<Path>, kind: ScanKind, config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    let base = kind.base(root);
    if !base.is_dir() {
        return Err(SyncError::MissingRoot { path: base });
    }

    Ok(scan_directory(root, kind, config))
}
