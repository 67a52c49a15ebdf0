//! Selector inventory and bounded waits.
//!
//! Everything coupled to the search site's markup lives here, so markup
//! churn only touches this file.

use crate::error::{BrowserError, Result};
use chromiumoxide::{Element, Page};
use std::time::Duration;
use tokio::time::Instant;

/// Image search landing page.
pub const SEARCH_URL: &str = "https://www.google.com/imghp";

/// Query input on the search page.
pub const QUERY_INPUT: &str = "input[name='q']";

/// One result tile in the results view.
pub const RESULT_CONTAINER: &str = r#"div[jsname="dTDiAc"]"#;

/// Full-resolution image element in the detail pane. Probed in order,
/// first match wins.
pub const FULL_RES_PROBES: &[&str] = &["img.sFlh5c.FyHeAf.iPVvYb", "img.n3VNCb", "img.r48_rs"];

/// XPath for a menu entry carrying exactly the given label text.
#[must_use]
pub fn labeled_div(label: &str) -> String {
    format!("//div[text()='{label}']")
}

/// Poll for a CSS selector until it resolves or the timeout elapses.
///
/// chromiumoxide has no explicit-wait primitive, so this polls
/// `find_element` at a fixed interval.
pub async fn wait_for_css(
    page: &Page,
    selector: &str,
    timeout: Duration,
    poll: Duration,
) -> Result<Element> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(element) = page.find_element(selector).await {
            return Ok(element);
        }
        if Instant::now() >= deadline {
            return Err(BrowserError::Timeout(selector.to_string()));
        }
        tokio::time::sleep(poll).await;
    }
}

/// Poll for an XPath expression until it resolves or the timeout elapses.
pub async fn wait_for_xpath(
    page: &Page,
    expression: &str,
    timeout: Duration,
    poll: Duration,
) -> Result<Element> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(element) = page.find_xpath(expression).await {
            return Ok(element);
        }
        if Instant::now() >= deadline {
            return Err(BrowserError::Timeout(expression.to_string()));
        }
        tokio::time::sleep(poll).await;
    }
}
