//! # File Access
//!
//! Whole-file load and crash-safe store for target sources.

use crate::error::{AppError, AppResult};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads the full UTF-8 text of `path`.
pub fn load_source(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces the content of `path` with `content`.
///
/// The text goes to a temporary file in the same directory, is flushed to
/// disk, and is then renamed over the target, so readers observe either the
/// old or the new file. The temporary file is removed if any step fails.
pub fn write_atomic(path: &Path, content: &str) -> AppResult<()> {
    let write_err = |source: std::io::Error| AppError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // Keep the target's mode; the temp file is created 0600.
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
