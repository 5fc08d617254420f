//! Error handling for the samgen resource generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! # Examples
//!
//! ```
//! use samgen_core::error::{Error, Result};
//!
//! fn parse_counter(raw: &str) -> Result<u32> {
//!     raw.parse()
//!         .map_err(|_| Error::argument(format!("invalid build counter '{raw}'")))
//! }
//!
//! assert!(parse_counter("12").is_ok());
//! assert!(parse_counter("twelve").is_err());
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type for samgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for samgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed or missing invocation argument
    #[error("Argument error: {0}")]
    Argument(String),

    /// The endpoint source could not be loaded or inspected
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// An endpoint whose name or path cannot produce a valid declaration
    #[error("Invalid endpoint '{name}': {reason}")]
    InvalidEndpoint { name: String, reason: String },

    /// Two endpoints share a name, so their derived identifiers would collide
    #[error("Duplicate endpoint name '{0}'")]
    DuplicateEndpoint(String),

    /// Skeleton does not contain exactly one placeholder
    #[error("Expected exactly one '{placeholder}' in {}, found {found}", .path.display())]
    Placeholder {
        path: PathBuf,
        placeholder: String,
        found: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new argument error
    pub fn argument<S: Into<String>>(msg: S) -> Self {
        Self::Argument(msg.into())
    }

    /// Create a new discovery error
    pub fn discovery<S: Into<String>>(msg: S) -> Self {
        Self::Discovery(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid endpoint error
    pub fn invalid_endpoint<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        Self::InvalidEndpoint {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_message() {
        let err = Error::Placeholder {
            path: PathBuf::from("templates/sam.yml"),
            placeholder: "@INJECT".to_string(),
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Expected exactly one '@INJECT' in templates/sam.yml, found 2"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "sam.yml");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "I/O error: sam.yml");
    }
}
