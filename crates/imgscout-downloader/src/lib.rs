//! Fetch-and-filter loop for image search downloads.
//!
//! For each result container: open it, resolve a full-resolution URL,
//! download into a scoped temp dir, size-check, and either commit the file
//! to the output tree or discard it. Single-item failures never abort a run.

pub mod downloader;
pub mod error;
pub mod fetch;
pub mod store;

pub use downloader::{run_loop, ImageDownloader, LoopOutcome};
pub use error::{FetchError, Result};
pub use fetch::{is_http_url, HttpFetcher, ImageFetcher};
pub use store::ImageStore;
