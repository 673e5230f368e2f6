//! Utilities for input path collection, file type checks and size display.

#[cfg(test)]
pub(crate) mod fixtures;

use crate::error::{MergeError, Result};
use std::path::{Path, PathBuf};

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Patterns are expanded in the order given; matches of a single pattern are
/// sorted alphabetically by `glob`. A pattern that matches nothing is an
/// error, so a mistyped file name is never silently dropped.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let paths = collect_paths_for_pattern(pattern.as_ref())?;
        resolved_paths.extend(paths);
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"chapter-*.pdf"`
/// - `"./scans/**/*.pdf"`
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern).map_err(|err| MergeError::InvalidInput {
        path: PathBuf::from(pattern),
        reason: err.to_string(),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| MergeError::InvalidInput {
            path: err.path().to_path_buf(),
            reason: err.to_string(),
        })?;

        if path.is_file() {
            resolved_paths.push(path);
        }
    }

    if resolved_paths.is_empty() {
        return Err(MergeError::InvalidInput {
            path: PathBuf::from(pattern),
            reason: "No files match this path".to_string(),
        });
    }

    Ok(resolved_paths)
}

/// Check whether a file name carries the `.pdf` extension (any case).
pub fn is_pdf_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
