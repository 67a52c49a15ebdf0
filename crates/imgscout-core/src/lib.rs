//! Shared types, configuration and errors for the imgscout workspace.

pub mod config;
pub mod error;
pub mod types;

pub use config::Settings;
pub use error::{ConfigError, CoreError, Result};
pub use types::{DownloadRequest, DownloadResult, DownloadStatus, ImageType};
