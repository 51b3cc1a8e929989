//! Scripted browser session for exercising the fetch workflow offline.
//!
//! Pages are declared up front as a URL → content map. Every session call is
//! appended to a shared trace so tests can assert the exact visit order, and
//! a click on a page that carries a download drops the file straight into the
//! download directory, the way a real browser would.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use xena_fetch::session::{Browser, ClickOutcome};

/// What a scripted page yields for each kind of query.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPage {
    /// Links returned for any CSS selector query.
    pub css_hrefs: Vec<String>,
    /// Links returned for any XPath href query.
    pub xpath_hrefs: Vec<String>,
    /// File dropped into the download dir when the page's anchor is clicked;
    /// `None` means the anchor is absent.
    pub download: Option<(String, Vec<u8>)>,
}

pub struct ScriptedBrowser {
    pages: HashMap<String, ScriptedPage>,
    current: Option<String>,
    download_dir: PathBuf,
    trace: Arc<Mutex<Vec<String>>>,
    unreachable: HashSet<String>,
}

impl ScriptedBrowser {
    pub fn new(download_dir: PathBuf, pages: HashMap<String, ScriptedPage>) -> Self {
        Self {
            pages,
            current: None,
            download_dir,
            trace: Arc::new(Mutex::new(Vec::new())),
            unreachable: HashSet::new(),
        }
    }

    /// Shared handle to the call trace; clone it before handing the browser
    /// to the workflow.
    pub fn trace_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.trace)
    }

    /// Make `goto` on this URL fail the way a dead endpoint would. The
    /// attempt is still recorded in the trace.
    pub fn mark_unreachable(&mut self, url: &str) {
        self.unreachable.insert(url.to_string());
    }

    fn record(&self, event: impl Into<String>) {
        self.trace.lock().unwrap().push(event.into());
    }

    fn current_page(&self) -> ScriptedPage {
        self.current
            .as_ref()
            .and_then(|url| self.pages.get(url))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl Browser for ScriptedBrowser {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.record(format!("goto {url}"));
        if self.unreachable.contains(url) {
            bail!("connection to {url} refused");
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn back(&mut self) -> Result<()> {
        self.record("back");
        Ok(())
    }

    async fn hrefs_by_css(&mut self, _selector: &str) -> Result<Vec<String>> {
        self.record("hrefs_by_css");
        Ok(self.current_page().css_hrefs)
    }

    async fn hrefs_by_xpath(&mut self, _xpath: &str) -> Result<Vec<String>> {
        self.record("hrefs_by_xpath");
        Ok(self.current_page().xpath_hrefs)
    }

    async fn click_by_xpath(&mut self, _xpath: &str) -> Result<ClickOutcome> {
        self.record("click_by_xpath");
        match self.current_page().download {
            Some((name, bytes)) => {
                fs::write(self.download_dir.join(name), bytes)?;
                Ok(ClickOutcome::Clicked)
            }
            None => Ok(ClickOutcome::NotFound),
        }
    }

    async fn quit(&mut self) -> Result<()> {
        self.record("quit");
        Ok(())
    }
}
