//! Browser automation for image search sessions.
//!
//! Provides headless Chromium control with automation-detection
//! countermeasures and a scrollable view over search result containers.

pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod selectors;
pub mod session;

pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
pub use session::{ImageSearchSession, SearchSession};
