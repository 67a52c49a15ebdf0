use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("chromium error: {0}")]
    Chromium(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("selector not found: {0}")]
    SelectorNotFound(String),

    #[error("timeout waiting for: {0}")]
    Timeout(String),
}
