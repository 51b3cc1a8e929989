//! The scrape-and-download workflow over a browser session.
//!
//! Walks the datapages hierarchy: the root listing yields cohort pages, each
//! cohort page yields pancan-normalized hub links, and each hub page carries
//! one download anchor at a fixed position. Every triggered download is
//! waited on and expanded before the next hub is visited, so the output
//! directory is quiet between clicks.

use crate::config::{DelayConfig, FetchConfig};
use crate::inflate;
use crate::session::{Browser, ClickOutcome};
use crate::settle;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::time::sleep;

/// Counters accumulated over one workflow run. `files_expanded` counts
/// distinct expansion targets; a settle pass that rewrites files from an
/// earlier hub does not inflate it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub cohorts_visited: u32,
    pub hubs_visited: u32,
    pub downloads_clicked: u32,
    pub anchors_missing: u32,
    pub files_expanded: u32,
}

/// Drives one full fetch run over an exclusively owned browser session.
pub struct Fetcher<B: Browser> {
    session: B,
    config: FetchConfig,
    delays: DelayConfig,
    output_dir: PathBuf,
}

impl<B: Browser> Fetcher<B> {
    /// `output_dir` must already exist and be the same directory the session
    /// was configured to download into.
    pub fn new(session: B, config: FetchConfig, output_dir: PathBuf) -> Self {
        let delays = config.delays();
        Self {
            session,
            config,
            delays,
            output_dir,
        }
    }

    /// Run the whole workflow, then tear the session down regardless of the
    /// outcome. A workflow error wins over a teardown error; a teardown
    /// failure after a clean run is surfaced on its own.
    pub async fn run_to_completion(mut self) -> Result<FetchSummary> {
        let run_result = self.run().await;
        let quit_result = self.quit().await;
        match run_result {
            Ok(summary) => {
                quit_result.context("browser teardown")?;
                Ok(summary)
            }
            Err(run_err) => {
                if let Err(quit_err) = quit_result {
                    tracing::warn!(
                        "browser teardown after failed run also failed: {:#}",
                        quit_err
                    );
                }
                Err(run_err)
            }
        }
    }

    /// Run the whole workflow. The session stays open either way; call
    /// [`Fetcher::quit`] afterwards, or use [`Fetcher::run_to_completion`]
    /// for both.
    pub async fn run(&mut self) -> Result<FetchSummary> {
        let mut summary = FetchSummary::default();
        let mut expanded_seen: HashSet<PathBuf> = HashSet::new();

        let cohorts = self.list_cohort_links().await?;
        tracing::info!("found {} cohort link(s)", cohorts.len());

        for cohort_url in cohorts {
            summary.cohorts_visited += 1;
            let hubs = self.list_hub_links(&cohort_url).await?;
            tracing::debug!("cohort {} has {} hub link(s)", cohort_url, hubs.len());

            for hub_url in hubs {
                summary.hubs_visited += 1;
                match self.download_hub(&hub_url).await? {
                    ClickOutcome::Clicked => {
                        summary.downloads_clicked += 1;
                        self.wait_for_settle().await?;
                        // Every pass rescans the whole directory, so files
                        // from earlier hubs come back; count each target once.
                        for path in inflate::decompress_new_arrivals(&self.output_dir)? {
                            if expanded_seen.insert(path) {
                                summary.files_expanded += 1;
                            }
                        }
                    }
                    ClickOutcome::NotFound => {
                        summary.anchors_missing += 1;
                        println!("Download link not found");
                        tracing::warn!("no download anchor on {}, skipping hub", hub_url);
                    }
                }
            }

            self.session
                .back()
                .await
                .context("navigate back after cohort")?;
            sleep(self.delays.back()).await;
        }

        // Catch any transfer still trailing the last click.
        self.wait_for_settle().await?;
        Ok(summary)
    }

    /// Tear the browser session down.
    pub async fn quit(&mut self) -> Result<()> {
        self.session.quit().await
    }

    /// Open the datapages root and read every cohort link off it.
    async fn list_cohort_links(&mut self) -> Result<Vec<String>> {
        self.session
            .goto(&self.config.root_url)
            .await
            .context("open datapages root")?;
        sleep(self.delays.root()).await;
        self.session
            .hrefs_by_css(&self.config.cohort_selector)
            .await
            .context("collect cohort links")
    }

    /// Open one cohort page and read its pancan-normalized hub links.
    async fn list_hub_links(&mut self, cohort_url: &str) -> Result<Vec<String>> {
        self.session
            .goto(cohort_url)
            .await
            .with_context(|| format!("open cohort page {cohort_url}"))?;
        sleep(self.delays.cohort()).await;
        self.session
            .hrefs_by_xpath(&self.config.hub_link_xpath)
            .await
            .context("collect hub links")
    }

    /// Open one hub page and click its download anchor if present.
    async fn download_hub(&mut self, hub_url: &str) -> Result<ClickOutcome> {
        self.session
            .goto(hub_url)
            .await
            .with_context(|| format!("open hub page {hub_url}"))?;
        sleep(self.delays.hub()).await;
        self.session
            .click_by_xpath(&self.config.download_anchor_xpath)
            .await
            .context("click download anchor")
    }

    async fn wait_for_settle(&self) -> Result<()> {
        settle::wait_for_downloads_to_settle(
            &self.output_dir,
            self.config.poll_interval(),
            self.config.settle_timeout(),
        )
        .await
        .context("wait for downloads to settle")
    }
}
