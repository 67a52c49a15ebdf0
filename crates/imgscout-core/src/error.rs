//! Core error types shared across the imgscout crates.

use thiserror::Error;

/// Central error type for core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file was requested but does not exist
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading the config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Validation("empty query".to_string());
        assert_eq!(err.to_string(), "validation error: empty query");

        let err = ConfigError::NotFound {
            path: "/tmp/missing.toml".to_string(),
        };
        assert_eq!(err.to_string(), "config file not found at /tmp/missing.toml");
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::NotFound {
            path: "x".to_string(),
        };
        let core_err: CoreError = config_err.into();
        assert!(matches!(core_err, CoreError::Config(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
    }
}
