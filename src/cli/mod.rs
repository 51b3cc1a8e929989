//! CLI for the xena-fetch downloader.

mod commands;

use crate::config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_fetch, run_inflate};

/// Top-level CLI for the xena-fetch downloader.
#[derive(Debug, Parser)]
#[command(name = "xena-fetch")]
#[command(
    about = "Browser-driven bulk fetcher for UCSC Xena pancan-normalized datasets",
    long_about = None
)]
pub struct Cli {
    /// Running without a subcommand is the same as `fetch` with no flags.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Walk every cohort and download each pancan-normalized dataset.
    Fetch {
        /// Directory the browser downloads into (default from config).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// WebDriver endpoint to attach to (default from config).
        #[arg(long, value_name = "URL")]
        webdriver_url: Option<String>,

        /// Run the browser without a visible window.
        #[arg(long)]
        headless: bool,
    },

    /// Expand compressed downloads already sitting in the output directory.
    Inflate {
        /// Directory to scan (default from config).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

impl Default for CliCommand {
    fn default() -> Self {
        CliCommand::Fetch {
            output_dir: None,
            webdriver_url: None,
            headless: false,
        }
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command.unwrap_or_default() {
            CliCommand::Fetch {
                output_dir,
                webdriver_url,
                headless,
            } => run_fetch(cfg, output_dir, webdriver_url, headless).await?,
            CliCommand::Inflate { output_dir } => run_inflate(&cfg, output_dir)?,
        }

        Ok(())
    }
}
