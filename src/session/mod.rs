//! Browser session control surface.
//!
//! [`Browser`] narrows the WebDriver protocol down to the handful of calls
//! the fetch workflow actually makes, so the workflow can run against a
//! scripted session in tests. The real implementation is
//! [`firefox::FirefoxSession`].

pub mod firefox;

use anyhow::Result;
use async_trait::async_trait;

/// Outcome of clicking an element that may legitimately be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The element was found and the click was dispatched.
    Clicked,
    /// Nothing matched; the caller decides whether that is fatal.
    NotFound,
}

/// Browser capabilities consumed by the fetch workflow.
///
/// Methods take `&mut self`: a session is an exclusively owned resource and
/// the workflow drives it strictly sequentially.
#[async_trait]
pub trait Browser: Send {
    /// Navigate to a URL.
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Navigate one step back in session history.
    async fn back(&mut self) -> Result<()>;

    /// `href` values of all elements matching a CSS selector, in document order.
    async fn hrefs_by_css(&mut self, selector: &str) -> Result<Vec<String>>;

    /// `href` values of all elements matching an XPath expression, in document order.
    async fn hrefs_by_xpath(&mut self, xpath: &str) -> Result<Vec<String>>;

    /// Click the first element matching `xpath`, reporting absence instead of
    /// failing.
    async fn click_by_xpath(&mut self, xpath: &str) -> Result<ClickOutcome>;

    /// Tear the session down. Subsequent calls are no-ops.
    async fn quit(&mut self) -> Result<()>;
}
