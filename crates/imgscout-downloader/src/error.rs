use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("not an http(s) URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("file too small: {size} bytes, minimum {min}")]
    TooSmall { size: u64, min: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser error: {0}")]
    Browser(#[from] imgscout_browser::BrowserError),
}

pub type Result<T> = std::result::Result<T, FetchError>;
