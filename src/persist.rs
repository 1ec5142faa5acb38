//! Atomic file replacement.
//!
//! Output is written to a temporary file next to the target and renamed over
//! it only once the writer has finished, so a failed encode or a full disk
//! never leaves a truncated file at the destination. The temporary file is
//! removed when the write fails. The replacement takes the permissions of the
//! file it replaces, or of a named template file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Write `target` atomically using the supplied writer callback.
///
/// Errors are returned as plain messages; callers wrap them in the error type
/// that fits their layer.
pub fn write_atomic<F>(target: &Path, write: F) -> std::result::Result<(), String>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> std::result::Result<(), String>,
{
    replace(target, target, write)
}

/// Write a byte buffer atomically, copying permissions from `template`.
pub fn write_bytes_atomic(
    target: &Path,
    bytes: &[u8],
    template: &Path,
) -> std::result::Result<(), String> {
    replace(target, template, |writer| {
        writer
            .write_all(bytes)
            .map_err(|e| format!("Failed to write output: {}", e))
    })
}

fn replace<F>(target: &Path, template: &Path, write: F) -> std::result::Result<(), String>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> std::result::Result<(), String>,
{
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| format!("Failed to create temporary file in {}: {}", dir.display(), e))?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer
            .flush()
            .map_err(|e| format!("Failed to flush output: {}", e))?;
    }

    if let Ok(metadata) = fs::metadata(template) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| format!("Failed to copy permissions: {}", e))?;
    }

    temp.persist(target)
        .map_err(|e| format!("Failed to replace {}: {}", target.display(), e.error))?;

    Ok(())
}
