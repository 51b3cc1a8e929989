//! `xena-fetch fetch` – run the full scrape-and-download workflow.

use crate::config::FetchConfig;
use crate::fetcher::Fetcher;
use crate::outdir;
use crate::session::firefox::FirefoxSession;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub async fn run_fetch(
    mut cfg: FetchConfig,
    output_dir: Option<PathBuf>,
    webdriver_url: Option<String>,
    headless: bool,
) -> Result<()> {
    if let Some(dir) = output_dir {
        cfg.output_dir = dir;
    }
    if let Some(url) = webdriver_url {
        cfg.webdriver_url = url;
    }
    if headless {
        cfg.headless = true;
    }

    outdir::ensure_output_directory(&cfg.output_dir)?;
    // The browser resolves the download pref against its own working
    // directory, so it needs an absolute path.
    let download_dir = fs::canonicalize(&cfg.output_dir)
        .with_context(|| format!("resolve output directory {}", cfg.output_dir.display()))?;
    println!("Downloading into {}", download_dir.display());

    let session = FirefoxSession::launch(&cfg, &download_dir).await?;
    let summary = Fetcher::new(session, cfg, download_dir)
        .run_to_completion()
        .await?;

    println!(
        "Visited {} cohort(s) and {} hub page(s): {} download(s), {} missing anchor(s), {} file(s) expanded",
        summary.cohorts_visited,
        summary.hubs_visited,
        summary.downloads_clicked,
        summary.anchors_missing,
        summary.files_expanded
    );
    tracing::info!("fetch run complete: {:?}", summary);
    Ok(())
}
