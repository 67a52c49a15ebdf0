//! HTTP download of candidate image bytes.

use crate::error::{FetchError, Result};
use imgscout_core::config::FetchSettings;
use std::path::Path;
use std::time::Duration;

/// Downloads a URL's bytes to a destination path.
///
/// The seam exists so the loop can be exercised without network access.
#[async_trait::async_trait]
pub trait ImageFetcher {
    /// Fetch `url` into `dest`, returning the number of bytes written.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// reqwest-backed fetcher with a bounded timeout and fixed user agent.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher from the configured timeout and user agent.
    ///
    /// # Errors
    /// Returns error if the underlying client cannot be constructed.
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        Ok(bytes.len() as u64)
    }
}

/// Whether a resolved candidate URL is a downloadable http(s) URL.
///
/// Detail panes frequently hand back `data:` URIs for thumbnails; those
/// are rejected here.
#[must_use]
pub fn is_http_url(candidate: &str) -> bool {
    match url::Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
