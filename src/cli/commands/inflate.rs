//! `xena-fetch inflate` – expand compressed downloads already on disk.

use crate::config::FetchConfig;
use crate::inflate;
use anyhow::Result;
use std::path::PathBuf;

pub fn run_inflate(cfg: &FetchConfig, output_dir: Option<PathBuf>) -> Result<()> {
    let dir = output_dir.unwrap_or_else(|| cfg.output_dir.clone());
    let written = inflate::decompress_new_arrivals(&dir)?;
    if written.is_empty() {
        println!("No compressed files in {}", dir.display());
    } else {
        for path in &written {
            println!("expanded {}", path.display());
        }
    }
    Ok(())
}
