use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use imgscout_core::config::BrowserSettings;
use tokio::task::JoinHandle;

/// Browser automation engine.
///
/// Owns the Chromium process and the spawned CDP handler task. The engine
/// must be closed explicitly; a run tears it down on every exit path.
pub struct BrowserEngine {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserEngine {
    /// Launch a browser using the configured window dimensions.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let fingerprint =
            FingerprintConfig::fixed(settings.window_width, settings.window_height);
        Self::launch_with_fingerprint(settings, fingerprint).await
    }

    /// Launch a browser with a specific fingerprint.
    ///
    /// Launch flags suppress the automation signals the target site keys on:
    /// headless, sandboxing disabled, `AutomationControlled` blink feature off.
    pub async fn launch_with_fingerprint(
        settings: &BrowserSettings,
        fingerprint: FingerprintConfig,
    ) -> Result<Self> {
        let args: Vec<String> = vec![
            "--disable-gpu".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-blink-features=AutomationControlled".to_string(),
            format!("--user-agent={}", fingerprint.user_agent),
        ];

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height)
            .args(args);
        if !settings.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // Drain CDP events for the lifetime of the browser
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self { browser, handler })
    }

    /// Open a new page at the given URL.
    pub async fn new_page(&self, url: &str) -> Result<Page> {
        self.browser
            .new_page(url)
            .await
            .map_err(|e| BrowserError::Navigation(e.to_string()))
    }

    /// Shut the browser down and stop the handler task.
    pub async fn close(&mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        let _ = self.browser.wait().await;
        self.handler.abort();
        Ok(())
    }
}
