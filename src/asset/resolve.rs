//! Logical path to on-disk file resolution.

use std::path::{Path, PathBuf};

/// Extension priority for the dimension-sync pass. The first existing file
/// wins, even when a lower-priority sibling is newer.
pub const SYNC_EXTENSIONS: &[&str] = &["webp", "webm", "png", "jpg", "jpeg", "gif"];

/// The padding pass only ever rewrites PNG sources.
pub const PAD_EXTENSIONS: &[&str] = &["png"];

/// Find the file for `logical` under `base_dir`, trying `extensions` in order.
///
/// The extension is appended to the logical path rather than substituted, so
/// a logical name containing dots (`face.smile`) resolves to `face.smile.png`.
pub fn resolve(base_dir: &Path, logical: &str, extensions: &[&str]) -> Option<PathBuf> {
    extensions.iter().find_map(|ext| {
        let candidate = base_dir.join(format!("{}.{}", logical, ext));
        candidate.is_file().then_some(candidate)
    })
}
