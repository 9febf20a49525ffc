use std::cmp::Reverse;
use std::path::Path;

use thiserror::Error;

use crate::entry::{parse_filename, ParsedEntry};

/// Fixed name of the generated feed document.
pub const OUTPUT_FILENAME: &str = "rss.xml";

/// Files never considered feed content, regardless of how they are named:
/// the tool's own binary (when dropped into the content directory) and the
/// feed it generates.
pub const EXCLUDED_FILES: &[&str] = &["feedbuild", OUTPUT_FILENAME];

/// Errors that can occur while scanning the content directory.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The directory itself could not be listed.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An individual directory entry could not be inspected.
    #[error("Failed to read directory entry: {0}")]
    Entry(#[from] std::io::Error),
}

/// Scans `dir` and returns the feed entries, sorted and ready to serialize.
///
/// Directories are skipped, as are the names in [`EXCLUDED_FILES`].
/// Filenames that do not match the feed pattern (or carry an invalid date)
/// are dropped silently; each skip is logged at debug level only.
///
/// # Errors
///
/// Returns [`ScanError`] if the directory listing itself fails. Per-file
/// parse rejection is never an error.
pub fn collect_entries(dir: &Path) -> Result<Vec<ParsedEntry>, ScanError> {
    let mut entries = Vec::new();

    let listing = std::fs::read_dir(dir).map_err(|source| ScanError::ReadDir {
        path: dir.display().to_string(),
        source,
    })?;

    for dirent in listing {
        let dirent = dirent?;
        if dirent.path().is_dir() {
            continue;
        }

        let name = dirent.file_name();
        let Some(name) = name.to_str() else {
            tracing::debug!(file = ?dirent.file_name(), "Skipping non-UTF-8 filename");
            continue;
        };
        if EXCLUDED_FILES.contains(&name) {
            continue;
        }

        match parse_filename(name) {
            Some(entry) => entries.push(entry),
            None => tracing::debug!(file = name, "Filename does not match feed pattern, skipping"),
        }
    }

    sort_entries(&mut entries);
    Ok(entries)
}

/// Orders entries for the feed: alerts before posts, then date descending.
///
/// The sort is stable, so entries with equal priority and date keep their
/// incoming (directory-listing) order. That order is filesystem-dependent
/// and not part of the contract.
pub fn sort_entries(entries: &mut [ParsedEntry]) {
    entries.sort_by_key(|e| (!e.is_alert, Reverse(e.date)));
}
