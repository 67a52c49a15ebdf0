//! The scroll/extract/download loop and its retry/size-filter policy.

use crate::error::{FetchError, Result};
use crate::fetch::{is_http_url, HttpFetcher, ImageFetcher};
use crate::store::ImageStore;
use imgscout_browser::{BrowserError, ImageSearchSession, SearchSession};
use imgscout_core::{DownloadRequest, DownloadResult, ImageType, Settings};
use std::path::PathBuf;

/// Drives a search session and commits qualifying images to disk.
pub struct ImageDownloader {
    store: ImageStore,
    fetcher: HttpFetcher,
    settings: Settings,
}

impl ImageDownloader {
    /// Create a downloader rooted at `output_root`.
    ///
    /// # Errors
    /// Returns error if the output root cannot be created or the HTTP
    /// client cannot be built.
    pub fn new(output_root: impl Into<PathBuf>, settings: Settings) -> Result<Self> {
        let output_root: PathBuf = output_root.into();
        std::fs::create_dir_all(&output_root)?;
        let fetcher = HttpFetcher::new(&settings.fetch)?;
        Ok(Self {
            store: ImageStore::new(output_root),
            fetcher,
            settings,
        })
    }

    /// Run one full download.
    ///
    /// Never panics and never returns `Err`: every failure is folded into
    /// the structured result, and the browser session is torn down on all
    /// exit paths.
    pub async fn download_images(&self, request: &DownloadRequest) -> DownloadResult {
        tracing::info!("Starting download for query: {}", request.query);
        let session = ImageSearchSession::open(&self.settings.browser, &request.query).await;
        self.run_with(session, request).await
    }

    /// Run against an already-attempted session open.
    ///
    /// Split out from [`Self::download_images`] so alternate session
    /// implementations can exercise the result mapping directly.
    pub async fn run_with<S>(
        &self,
        session: imgscout_browser::Result<S>,
        request: &DownloadRequest,
    ) -> DownloadResult
    where
        S: SearchSession + Send,
    {
        let mut session = match session {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("Could not start search session: {e}");
                return DownloadResult::failure(e.to_string(), Vec::new(), 0);
            }
        };

        if let Err(e) = self.store.prepare(request).await {
            tracing::error!("Could not create output directory: {e}");
            let _ = session.close().await;
            return DownloadResult::failure(e.to_string(), Vec::new(), 0);
        }

        let outcome = run_loop(
            &mut session,
            &self.fetcher,
            &self.store,
            request,
            self.settings.limits.scroll_budget,
        )
        .await;

        if let Err(e) = session.close().await {
            tracing::warn!("Error closing browser session: {e}");
        }

        match outcome.error {
            Some(e) => DownloadResult::failure(e.to_string(), outcome.files, outcome.attempts),
            None => DownloadResult::success(outcome.files, outcome.attempts),
        }
    }
}

/// Outcome of driving the loop over one session.
#[derive(Debug)]
pub struct LoopOutcome {
    /// Committed files, in download order
    pub files: Vec<PathBuf>,
    /// Containers processed, qualifying or not
    pub attempts: u64,
    /// Session failure that aborted the loop, if any
    pub error: Option<BrowserError>,
}

/// Drive the scroll/extract/download loop over an open session.
///
/// Public so alternate session and fetcher implementations can exercise
/// the loop policy directly. Per-item failures are logged and skipped.
/// Failures while enumerating containers or scrolling are session-level:
/// they abort the loop, and the outcome carries the error alongside the
/// files already committed. The loop otherwise stops once `target_count`
/// images are committed or the scroll budget is exhausted.
pub async fn run_loop<S, F>(
    session: &mut S,
    fetcher: &F,
    store: &ImageStore,
    request: &DownloadRequest,
    scroll_budget: u32,
) -> LoopOutcome
where
    S: SearchSession + Send,
    F: ImageFetcher + Sync,
{
    let mut files: Vec<PathBuf> = Vec::new();
    let mut attempts = 0u64;
    let mut scrolls = 0u32;

    // "all" never touches the filter UI; a filter failure is non-fatal.
    if request.image_type != ImageType::All {
        if let Err(e) = session.apply_type_filter(request.image_type).await {
            tracing::warn!("Could not set image type filter: {e}");
        }
    }

    while files.len() < request.target_count && scrolls < scroll_budget {
        let count = match session.container_count().await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!("Session failed while enumerating containers: {e}");
                return LoopOutcome {
                    files,
                    attempts,
                    error: Some(e),
                };
            }
        };
        tracing::debug!("Found {count} image containers");

        // Resume at the success count, as the original site driver does;
        // failed containers may be revisited after a scroll.
        for index in files.len()..count {
            if files.len() >= request.target_count {
                break;
            }

            attempts += 1;
            let sequence = files.len() + 1;
            match process_candidate(session, fetcher, store, request, index, sequence).await {
                Ok(Some(path)) => {
                    tracing::info!(
                        "Downloaded image {}/{}: {}",
                        sequence,
                        request.target_count,
                        path.display()
                    );
                    files.push(path);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!("Error processing image: {e}");
                }
            }
        }

        if files.len() < request.target_count {
            scrolls += 1;
            if let Err(e) = session.scroll_for_more().await {
                tracing::error!("Session failed while scrolling for more results: {e}");
                return LoopOutcome {
                    files,
                    attempts,
                    error: Some(e),
                };
            }
        }
    }

    LoopOutcome {
        files,
        attempts,
        error: None,
    }
}

/// Process one result container.
///
/// `Ok(None)` means no full-resolution URL could be resolved; `Err`
/// covers rejected URLs, undersized files, and selector/network/I/O
/// failures. Either way the caller moves on to the next container.
async fn process_candidate<S, F>(
    session: &mut S,
    fetcher: &F,
    store: &ImageStore,
    request: &DownloadRequest,
    index: usize,
    sequence: usize,
) -> Result<Option<PathBuf>>
where
    S: SearchSession + Send,
    F: ImageFetcher + Sync,
{
    session.open_container(index).await?;

    let Some(url) = session.resolve_image_url().await? else {
        return Ok(None);
    };
    if !is_http_url(&url) {
        return Err(FetchError::InvalidUrl(url));
    }

    // Scoped temp dir, reclaimed on every exit path of this function.
    let scratch = tempfile::tempdir()?;
    let temp_path = scratch.path().join("image.jpg");

    let size = fetcher.fetch(&url, &temp_path).await?;
    tracing::debug!("Downloaded file size: {:.1}KB", size as f64 / 1024.0);

    if size < request.min_size_bytes {
        return Err(FetchError::TooSmall {
            size,
            min: request.min_size_bytes,
        });
    }

    let dest = store.commit(&temp_path, request, sequence).await?;
    Ok(Some(dest))
}
