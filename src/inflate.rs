//! Expansion of gzip-compressed downloads into plain-text siblings.
//!
//! Every completed `*.gz` file in the output directory is decompressed next
//! to itself under the derived name (`.gz` stripped, `.txt` appended), so
//! `HiSeqV2.gz` becomes `HiSeqV2.txt`. Compressed originals are kept;
//! re-running simply overwrites the expanded copies.

use crate::outdir::COMPRESSED_SUFFIX;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Suffix appended to the stripped name of an expanded file.
pub const EXPANDED_SUFFIX: &str = ".txt";

/// Derived name of the expanded sibling, or `None` when the file is not a
/// completed compressed download (`sample.txt.gz` → `sample.txt.txt`).
pub fn expanded_name(compressed_name: &str) -> Option<String> {
    compressed_name
        .strip_suffix(COMPRESSED_SUFFIX)
        .map(|stem| format!("{stem}{EXPANDED_SUFFIX}"))
}

/// Decompress every `*.gz` regular file in `dir` into its expanded sibling,
/// overwriting any existing expansion. Returns the paths written.
pub fn decompress_new_arrivals(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read output directory {}", dir.display()))?;

    let mut written = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("read output directory {}", dir.display()))?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let name = match file_name.to_str() {
            Some(name) => name,
            None => continue,
        };
        let target_name = match expanded_name(name) {
            Some(target_name) => target_name,
            None => continue,
        };

        let source = entry.path();
        let target = dir.join(&target_name);
        inflate_file(&source, &target)
            .with_context(|| format!("expand {}", source.display()))?;
        tracing::debug!("expanded {} -> {}", source.display(), target.display());
        written.push(target);
    }
    Ok(written)
}

/// Stream-decompress one gzip file. The target is created (or truncated)
/// before any bytes are written.
fn inflate_file(source: &Path, target: &Path) -> Result<()> {
    let mut decoder = GzDecoder::new(File::open(source)?);
    let mut out = File::create(target)?;
    io::copy(&mut decoder, &mut out)?;
    Ok(())
}
