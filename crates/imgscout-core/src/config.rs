//! Configuration for imgscout runs.
//!
//! Settings are loaded from an optional TOML file with every field
//! defaulted, then overridden by environment variables. CLI flags are
//! applied on top by the binary.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Full run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Browser launch and interaction settings
    pub browser: BrowserSettings,
    /// HTTP download settings
    pub fetch: FetchSettings,
    /// Loop bounds
    pub limits: LimitSettings,
}

impl Settings {
    /// Load settings from a TOML file, or defaults when no path is given.
    ///
    /// # Errors
    /// Returns error if the path is given but missing, unreadable, or not
    /// valid TOML.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound {
                        path: path.display().to_string(),
                    });
                }
                tracing::debug!("Loading settings from {}", path.display());
                let contents = fs::read_to_string(path)?;
                let settings = toml::from_str(&contents)?;
                Ok(settings)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load settings and apply environment variable overrides.
    ///
    /// Supported variables:
    /// - `IMGSCOUT_HEADLESS`: override browser headless mode (true/false)
    /// - `IMGSCOUT_SCROLL_BUDGET`: override the scroll-attempt budget
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut settings = Self::load(path)?;
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    // Takes the variable lookup as a closure so tests can drive it
    // without mutating process-wide environment state.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("IMGSCOUT_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(val) = lookup("IMGSCOUT_SCROLL_BUDGET") {
            if let Ok(budget) = val.parse() {
                self.limits.scroll_budget = budget;
                tracing::debug!("Override limits.scroll_budget from env: {}", budget);
            }
        }
    }
}

/// Browser launch and page interaction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run the browser headless
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Per-step wait when driving the type-filter UI, in milliseconds
    pub filter_step_timeout_ms: u64,
    /// Wait per full-resolution selector probe, in milliseconds
    pub selector_timeout_ms: u64,
    /// Interval between element-lookup polls, in milliseconds
    pub poll_interval_ms: u64,
    /// Settle delay after submitting the query, in milliseconds
    pub post_search_delay_ms: u64,
    /// Settle delay after clicking a result container, in milliseconds
    pub click_delay_ms: u64,
    /// Settle delay after scrolling a container into view, in milliseconds
    pub focus_delay_ms: u64,
    /// Settle delay after scrolling for more results, in milliseconds
    pub scroll_delay_ms: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            filter_step_timeout_ms: 10_000,
            selector_timeout_ms: 5_000,
            poll_interval_ms: 250,
            post_search_delay_ms: 2_000,
            click_delay_ms: 1_000,
            focus_delay_ms: 500,
            scroll_delay_ms: 1_000,
        }
    }
}

/// HTTP download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Network timeout for one image download, in seconds
    pub timeout_secs: u64,
    /// User agent sent with download requests
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// Bounds on the fetch-and-filter loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    /// Maximum scroll attempts before giving up
    pub scroll_budget: u32,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self { scroll_budget: 10 }
    }
}
