//! Shared types used across the imgscout workspace.
//!
//! This module defines the request/result shapes for a download run and
//! the result-type filter enum.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result-type filter applied to an image search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    /// No filter; the filter UI is never touched for this value.
    All,
    Photo,
    Clipart,
    Lineart,
    Gif,
}

impl ImageType {
    /// Label as it appears in the search page's type submenu.
    #[must_use]
    pub fn menu_label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Photo => "Photo",
            Self::Clipart => "Clipart",
            Self::Lineart => "Lineart",
            Self::Gif => "Gif",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::All => "all",
            Self::Photo => "photo",
            Self::Clipart => "clipart",
            Self::Lineart => "lineart",
            Self::Gif => "gif",
        };
        write!(f, "{s}")
    }
}

/// Parameters for one download run. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Search query
    pub query: String,
    /// Number of qualifying images to download
    pub target_count: usize,
    /// Minimum accepted file size in bytes
    pub min_size_bytes: u64,
    /// Result-type filter
    pub image_type: ImageType,
}

impl DownloadRequest {
    /// Create a validated request.
    ///
    /// # Errors
    /// Returns error if the query is empty/whitespace or `target_count` is zero.
    pub fn new(
        query: impl Into<String>,
        target_count: usize,
        min_size_bytes: u64,
        image_type: ImageType,
    ) -> Result<Self, CoreError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(CoreError::Validation("query must not be empty".to_string()));
        }
        if target_count == 0 {
            return Err(CoreError::Validation(
                "target count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            query,
            target_count,
            min_size_bytes,
            image_type,
        })
    }

    /// Directory/file name stem: the query with spaces replaced by underscores.
    #[must_use]
    pub fn dir_name(&self) -> String {
        self.query.replace(' ', "_")
    }
}

/// Outcome status of a download run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    Success,
    Error,
}

/// Structured result of one download run.
///
/// Invariants: `downloaded_count == files.len()` and `attempts >= downloaded_count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadResult {
    pub status: DownloadStatus,
    pub downloaded_count: usize,
    /// Committed files, in download order
    pub files: Vec<PathBuf>,
    /// Containers processed, qualifying or not
    pub attempts: u64,
    /// Present when `status` is `Error`
    pub error: Option<String>,
}

impl DownloadResult {
    /// Build a success result from the committed files.
    #[must_use]
    pub fn success(files: Vec<PathBuf>, attempts: u64) -> Self {
        Self {
            status: DownloadStatus::Success,
            downloaded_count: files.len(),
            files,
            attempts,
            error: None,
        }
    }

    /// Build an error result, carrying any partial successes.
    #[must_use]
    pub fn failure(error: impl Into<String>, partial_files: Vec<PathBuf>, attempts: u64) -> Self {
        Self {
            status: DownloadStatus::Error,
            downloaded_count: partial_files.len(),
            files: partial_files,
            attempts,
            error: Some(error.into()),
        }
    }
}
