use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Datapages listing for the TCGA hub; every run starts here.
const DEFAULT_ROOT_URL: &str =
    "https://xenabrowser.net/datapages/?hub=https://tcga.xenahubs.net:443";
/// Anchor inside each cohort entry of the root listing.
const DEFAULT_COHORT_SELECTOR: &str = "li.MuiTypography-root-158 > a";
/// Hub links on a cohort page, matched by their visible text.
const DEFAULT_HUB_LINK_XPATH: &str = "//a[contains(text(), 'pancan normalized')]";
/// Fixed position of the download anchor on a hub's dataset page.
const DEFAULT_DOWNLOAD_ANCHOR_XPATH: &str =
    "/html/body/div/div[2]/div/div/div/span[6]/span/a[1]";

/// Post-navigation delays in seconds (optional section in config.toml).
/// The datapages UI renders client-side, so each page gets a grace period
/// before its links are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayConfig {
    /// After loading the datapages root.
    pub root_secs: u64,
    /// After loading a cohort listing.
    pub cohort_secs: u64,
    /// After loading a hub's dataset page.
    pub hub_secs: u64,
    /// After navigating back in session history.
    pub back_secs: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            root_secs: 5,
            cohort_secs: 2,
            hub_secs: 5,
            back_secs: 2,
        }
    }
}

impl DelayConfig {
    pub fn root(&self) -> Duration {
        Duration::from_secs(self.root_secs)
    }

    pub fn cohort(&self) -> Duration {
        Duration::from_secs(self.cohort_secs)
    }

    pub fn hub(&self) -> Duration {
        Duration::from_secs(self.hub_secs)
    }

    pub fn back(&self) -> Duration {
        Duration::from_secs(self.back_secs)
    }
}

/// Global configuration loaded from `~/.config/xena-fetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// WebDriver endpoint a geckodriver instance listens on.
    pub webdriver_url: String,
    /// Directory the browser downloads into, relative to the working directory
    /// unless absolute.
    pub output_dir: PathBuf,
    /// Datapages URL listing every cohort.
    pub root_url: String,
    /// CSS selector for cohort links on the root listing.
    pub cohort_selector: String,
    /// XPath for pancan-normalized hub links on a cohort page.
    pub hub_link_xpath: String,
    /// XPath of the download anchor on a hub's dataset page.
    pub download_anchor_xpath: String,
    /// Run the browser without a visible window.
    #[serde(default)]
    pub headless: bool,
    /// Seconds between scans while waiting for downloads to finish.
    pub poll_interval_secs: u64,
    /// Ceiling in seconds for any single settle wait.
    pub settle_timeout_secs: u64,
    /// Optional page-load delays; if missing, built-in defaults are used.
    #[serde(default)]
    pub delays: Option<DelayConfig>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            output_dir: PathBuf::from("dwnData"),
            root_url: DEFAULT_ROOT_URL.to_string(),
            cohort_selector: DEFAULT_COHORT_SELECTOR.to_string(),
            hub_link_xpath: DEFAULT_HUB_LINK_XPATH.to_string(),
            download_anchor_xpath: DEFAULT_DOWNLOAD_ANCHOR_XPATH.to_string(),
            headless: false,
            poll_interval_secs: 1,
            settle_timeout_secs: 3600,
            delays: None,
        }
    }
}

impl FetchConfig {
    /// Effective delays, falling back to the built-in defaults.
    pub fn delays(&self) -> DelayConfig {
        self.delays.clone().unwrap_or_default()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn settle_timeout(&self) -> Duration {
        Duration::from_secs(self.settle_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("xena-fetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.webdriver_url, "http://localhost:4444");
        assert_eq!(cfg.output_dir, PathBuf::from("dwnData"));
        assert_eq!(
            cfg.root_url,
            "https://xenabrowser.net/datapages/?hub=https://tcga.xenahubs.net:443"
        );
        assert_eq!(cfg.cohort_selector, "li.MuiTypography-root-158 > a");
        assert_eq!(cfg.hub_link_xpath, "//a[contains(text(), 'pancan normalized')]");
        assert_eq!(
            cfg.download_anchor_xpath,
            "/html/body/div/div[2]/div/div/div/span[6]/span/a[1]"
        );
        assert!(!cfg.headless);
        assert_eq!(cfg.poll_interval_secs, 1);
        assert_eq!(cfg.settle_timeout_secs, 3600);
        assert!(cfg.delays.is_none());
    }

    #[test]
    fn default_delay_values() {
        let delays = FetchConfig::default().delays();
        assert_eq!(delays.root(), Duration::from_secs(5));
        assert_eq!(delays.cohort(), Duration::from_secs(2));
        assert_eq!(delays.hub(), Duration::from_secs(5));
        assert_eq!(delays.back(), Duration::from_secs(2));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.webdriver_url, cfg.webdriver_url);
        assert_eq!(parsed.output_dir, cfg.output_dir);
        assert_eq!(parsed.root_url, cfg.root_url);
        assert_eq!(parsed.cohort_selector, cfg.cohort_selector);
        assert_eq!(parsed.poll_interval_secs, cfg.poll_interval_secs);
        assert_eq!(parsed.settle_timeout_secs, cfg.settle_timeout_secs);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            webdriver_url = "http://localhost:9515"
            output_dir = "/data/xena"
            root_url = "https://xenabrowser.net/datapages/?hub=https://gdc.xenahubs.net:443"
            cohort_selector = "li.cohort > a"
            hub_link_xpath = "//a[contains(text(), 'gene expression')]"
            download_anchor_xpath = "//span/a[1]"
            headless = true
            poll_interval_secs = 2
            settle_timeout_secs = 600
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.webdriver_url, "http://localhost:9515");
        assert_eq!(cfg.output_dir, PathBuf::from("/data/xena"));
        assert_eq!(cfg.cohort_selector, "li.cohort > a");
        assert!(cfg.headless);
        assert_eq!(cfg.poll_interval_secs, 2);
        assert_eq!(cfg.settle_timeout_secs, 600);
        assert!(cfg.delays.is_none());
    }

    #[test]
    fn config_toml_delays_section() {
        let toml = r#"
            webdriver_url = "http://localhost:4444"
            output_dir = "dwnData"
            root_url = "https://xenabrowser.net/datapages/?hub=https://tcga.xenahubs.net:443"
            cohort_selector = "li.MuiTypography-root-158 > a"
            hub_link_xpath = "//a[contains(text(), 'pancan normalized')]"
            download_anchor_xpath = "/html/body/div/div[2]/div/div/div/span[6]/span/a[1]"
            poll_interval_secs = 1
            settle_timeout_secs = 3600

            [delays]
            root_secs = 0
            cohort_secs = 0
            hub_secs = 1
            back_secs = 0
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        let delays = cfg.delays();
        assert_eq!(delays.root(), Duration::ZERO);
        assert_eq!(delays.cohort(), Duration::ZERO);
        assert_eq!(delays.hub(), Duration::from_secs(1));
        assert_eq!(delays.back(), Duration::ZERO);
    }
}
