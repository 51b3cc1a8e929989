//! Firefox session over a WebDriver endpoint (geckodriver).
//!
//! The profile is prepared for unattended bulk fetching: downloads land
//! straight in the configured directory and the gzip MIME type is saved to
//! disk without a dialog, so clicking a dataset anchor is all it takes to
//! start a transfer.

use super::{Browser, ClickOutcome};
use crate::config::FetchConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::Path;
use thirtyfour::common::capabilities::firefox::FirefoxPreferences;
use thirtyfour::prelude::*;
use url::Url;

/// MIME type Firefox must save without prompting.
const GZIP_MIME: &str = "application/gzip";

/// A live Firefox session. The driver is dropped on [`Browser::quit`], after
/// which every other call reports the session as closed.
pub struct FirefoxSession {
    driver: Option<WebDriver>,
}

impl FirefoxSession {
    /// Attach to the WebDriver endpoint and start a session whose downloads
    /// land in `download_dir`. The directory should already exist and be
    /// absolute, since the browser resolves it against its own working
    /// directory.
    pub async fn launch(config: &FetchConfig, download_dir: &Path) -> Result<Self> {
        let mut prefs = FirefoxPreferences::new();
        prefs.set("browser.download.folderList", 2)?;
        prefs.set("browser.download.manager.showWhenStarting", false)?;
        prefs.set("browser.download.dir", download_dir.display().to_string())?;
        prefs.set("browser.helperApps.neverAsk.saveToDisk", GZIP_MIME)?;

        let mut caps = DesiredCapabilities::firefox();
        caps.set_preferences(prefs)?;
        if config.headless {
            caps.set_headless()?;
        }

        let driver = WebDriver::new(&config.webdriver_url, caps)
            .await
            .with_context(|| format!("attach to WebDriver at {}", config.webdriver_url))?;
        tracing::info!(
            "browser session started, downloads go to {}",
            download_dir.display()
        );
        Ok(Self {
            driver: Some(driver),
        })
    }

    fn driver(&self) -> Result<&WebDriver> {
        self.driver
            .as_ref()
            .ok_or_else(|| anyhow!("browser session already closed"))
    }

    async fn collect_hrefs(&self, by: By) -> Result<Vec<String>> {
        let driver = self.driver()?;
        let base = driver.current_url().await.context("read current URL")?;
        let elements = driver.find_all(by).await?;
        let mut hrefs = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(href) = element.attr("href").await? {
                hrefs.push(resolve_href(&base, &href));
            }
        }
        Ok(hrefs)
    }
}

/// Resolve an `href` attribute against the page it was scraped from.
/// Geckodriver reports the literal attribute value, which may be relative.
fn resolve_href(base: &Url, href: &str) -> String {
    match base.join(href) {
        Ok(resolved) => resolved.into(),
        Err(_) => href.to_string(),
    }
}

#[async_trait]
impl Browser for FirefoxSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.driver()?
            .goto(url)
            .await
            .with_context(|| format!("navigate to {url}"))
    }

    async fn back(&mut self) -> Result<()> {
        self.driver()?.back().await.context("navigate back")
    }

    async fn hrefs_by_css(&mut self, selector: &str) -> Result<Vec<String>> {
        self.collect_hrefs(By::Css(selector))
            .await
            .with_context(|| format!("collect links matching {selector}"))
    }

    async fn hrefs_by_xpath(&mut self, xpath: &str) -> Result<Vec<String>> {
        self.collect_hrefs(By::XPath(xpath))
            .await
            .with_context(|| format!("collect links matching {xpath}"))
    }

    async fn click_by_xpath(&mut self, xpath: &str) -> Result<ClickOutcome> {
        let anchors = self.driver()?.find_all(By::XPath(xpath)).await?;
        match anchors.into_iter().next() {
            Some(anchor) => {
                anchor
                    .click()
                    .await
                    .with_context(|| format!("click element at {xpath}"))?;
                Ok(ClickOutcome::Clicked)
            }
            None => Ok(ClickOutcome::NotFound),
        }
    }

    async fn quit(&mut self) -> Result<()> {
        if let Some(driver) = self.driver.take() {
            driver.quit().await.context("close browser session")?;
            tracing::info!("browser session closed");
        }
        Ok(())
    }
}
