//! Search session driver.
//!
//! A session is a live, scrollable view over search result containers.
//! The [`SearchSession`] trait is the seam the fetch loop drives; the
//! concrete [`ImageSearchSession`] talks to Chromium.

use crate::engine::BrowserEngine;
use crate::error::{BrowserError, Result};
use crate::selectors::{self, labeled_div, wait_for_css, wait_for_xpath};
use chromiumoxide::Page;
use imgscout_core::config::BrowserSettings;
use imgscout_core::ImageType;
use std::time::Duration;

/// Operations the fetch-and-filter loop needs from a live search session.
#[async_trait::async_trait]
pub trait SearchSession {
    /// Apply the result-type filter through the tools menu.
    async fn apply_type_filter(&mut self, image_type: ImageType) -> Result<()>;

    /// Number of result containers currently loaded.
    async fn container_count(&mut self) -> Result<usize>;

    /// Scroll the container at `index` into view and open its detail pane.
    async fn open_container(&mut self, index: usize) -> Result<()>;

    /// Probe for the full-resolution image URL of the open detail pane.
    ///
    /// Returns `Ok(None)` when no probe matched or the element has no `src`.
    async fn resolve_image_url(&mut self) -> Result<Option<String>>;

    /// Scroll to the bottom of the results to load more.
    async fn scroll_for_more(&mut self) -> Result<()>;

    /// Tear the session down.
    async fn close(&mut self) -> Result<()>;
}

/// Live session against the image search site.
pub struct ImageSearchSession {
    engine: BrowserEngine,
    page: Page,
    settings: BrowserSettings,
}

impl ImageSearchSession {
    /// Launch a browser, open the search page and submit the query.
    ///
    /// The engine is torn down before returning an error, so a failed open
    /// never leaks a browser process.
    pub async fn open(settings: &BrowserSettings, query: &str) -> Result<Self> {
        let mut engine = BrowserEngine::launch(settings).await?;
        let page = match Self::submit_query(&engine, settings, query).await {
            Ok(page) => page,
            Err(e) => {
                let _ = engine.close().await;
                return Err(e);
            }
        };
        Ok(Self {
            engine,
            page,
            settings: settings.clone(),
        })
    }

    async fn submit_query(
        engine: &BrowserEngine,
        settings: &BrowserSettings,
        query: &str,
    ) -> Result<Page> {
        tracing::info!("Navigating to image search...");
        let page = engine.new_page(selectors::SEARCH_URL).await?;

        let input = page
            .find_element(selectors::QUERY_INPUT)
            .await
            .map_err(|e| {
                BrowserError::SelectorNotFound(format!("{}: {e}", selectors::QUERY_INPUT))
            })?;
        input
            .click()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        input
            .type_str(query)
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        input
            .press_key("Enter")
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;

        tokio::time::sleep(Duration::from_millis(settings.post_search_delay_ms)).await;
        Ok(page)
    }

    fn poll(&self) -> Duration {
        Duration::from_millis(self.settings.poll_interval_ms)
    }
}

#[async_trait::async_trait]
impl SearchSession for ImageSearchSession {
    async fn apply_type_filter(&mut self, image_type: ImageType) -> Result<()> {
        let timeout = Duration::from_millis(self.settings.filter_step_timeout_ms);
        let poll = self.poll();
        let settle = Duration::from_millis(self.settings.click_delay_ms);

        tracing::info!("Setting image type filter: {image_type}");

        let tools = wait_for_xpath(&self.page, &labeled_div("Tools"), timeout, poll).await?;
        tools
            .click()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        tokio::time::sleep(settle).await;

        let type_menu = wait_for_xpath(&self.page, &labeled_div("Type"), timeout, poll).await?;
        type_menu
            .click()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        tokio::time::sleep(settle).await;

        let option = wait_for_xpath(
            &self.page,
            &labeled_div(image_type.menu_label()),
            timeout,
            poll,
        )
        .await?;
        option
            .click()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        tokio::time::sleep(Duration::from_millis(self.settings.post_search_delay_ms)).await;

        Ok(())
    }

    async fn container_count(&mut self) -> Result<usize> {
        let containers = self
            .page
            .find_elements(selectors::RESULT_CONTAINER)
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        Ok(containers.len())
    }

    async fn open_container(&mut self, index: usize) -> Result<()> {
        // Containers go stale across scrolls; re-enumerate on every call.
        let containers = self
            .page
            .find_elements(selectors::RESULT_CONTAINER)
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        let container = containers
            .into_iter()
            .nth(index)
            .ok_or_else(|| BrowserError::SelectorNotFound(format!("result container {index}")))?;

        container
            .scroll_into_view()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        tokio::time::sleep(Duration::from_millis(self.settings.focus_delay_ms)).await;
        container
            .click()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        tokio::time::sleep(Duration::from_millis(self.settings.click_delay_ms)).await;
        Ok(())
    }

    async fn resolve_image_url(&mut self) -> Result<Option<String>> {
        let timeout = Duration::from_millis(self.settings.selector_timeout_ms);
        let poll = self.poll();

        for probe in selectors::FULL_RES_PROBES {
            match wait_for_css(&self.page, probe, timeout, poll).await {
                Ok(element) => {
                    let src = element
                        .attribute("src")
                        .await
                        .map_err(|e| BrowserError::Chromium(e.to_string()))?;
                    return Ok(src);
                }
                Err(BrowserError::Timeout(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    async fn scroll_for_more(&mut self) -> Result<()> {
        self.page
            .evaluate("window.scrollTo(0, document.body.scrollHeight);")
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        tokio::time::sleep(Duration::from_millis(self.settings.scroll_delay_ms)).await;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.engine.close().await
    }
}
