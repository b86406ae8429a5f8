//! Source file discovery.
//!
//! Resolves the user's target into the list of Ruby files to process: a
//! single `.rb` file, or every `.rb` file below a directory.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Extension (with dot) every processed file must carry.
pub const SOURCE_EXTENSION: &str = ".rb";

/// Resolve `target` into a sorted, deduplicated list of source files.
///
/// A file target must end in [`SOURCE_EXTENSION`]; the extension is checked
/// before existence. A directory with no Ruby files yields an empty list.
pub fn discover(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_dir() {
        return find_sources(target);
    }
    validate_extension(target)?;
    if !target.exists() {
        return Err(Error::NotFound(target.to_path_buf()));
    }
    Ok(vec![target.to_path_buf()])
}

/// Reject paths that do not name a Ruby source file.
pub fn validate_extension(path: &Path) -> Result<()> {
    if path.to_string_lossy().ends_with(SOURCE_EXTENSION) {
        Ok(())
    } else {
        Err(Error::UnsupportedExtension(path.to_path_buf()))
    }
}

/// Recursively collect `**/*.rb` under `dir`.
fn find_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!(
        "{}/**/*{}",
        escaped.trim_end_matches('/'),
        SOURCE_EXTENSION
    );

    let mut files: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        log::warn!("no {} files found under {}", SOURCE_EXTENSION, dir.display());
    }

    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}
