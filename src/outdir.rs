//! Output directory lifecycle and in-progress download detection.
//!
//! The browser writes every triggered download into one flat directory,
//! using a `.part` suffix while the transfer is still running and renaming
//! to the final name on completion. Scanning for that suffix is the only
//! signal the workflow has about transfer progress.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Suffix the browser appends to a download that is still in flight.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Suffix of a completed compressed download.
pub const COMPRESSED_SUFFIX: &str = ".gz";

/// Create the output directory (and any missing parents). Succeeds if it
/// already exists; files already present are left alone.
pub fn ensure_output_directory(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("create output directory {}", dir.display()))
}

/// True while at least one in-flight download marker remains in `dir`.
pub fn has_partial_downloads(dir: &Path) -> io::Result<bool> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().ends_with(PARTIAL_SUFFIX) {
            return Ok(true);
        }
    }
    Ok(false)
}
