// src/error.rs

//! Unified error handling for the parser and delivery layers.

use std::fmt;

use thiserror::Error;

/// Result type alias for companion operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Match pattern could not be compiled
    #[error("Invalid match pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A task was built without all required fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required field could not be extracted from a page
    #[error("Could not extract {field}: {message}")]
    Extraction { field: String, message: String },

    /// Fetching a page failed
    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    /// The permission-gated fetch was attempted without a grant
    #[error("Permission denied for {url}")]
    PermissionDenied { url: String },

    /// No registered parser accepts the URL
    #[error("No parser found for {url}")]
    NoParser { url: String },

    /// An explicit parser choice does not name a registered parser
    #[error("Unknown parser '{name}'")]
    UnknownParser { name: String },

    /// A parse finished without producing a single task
    #[error("No tasks could be parsed from {url}")]
    NoRecords { url: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a match pattern error.
    pub fn pattern(pattern: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an extraction error naming the field that failed.
    pub fn extraction(field: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extraction {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Create a fetch error with the failing URL.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Name of the field for extraction errors.
    pub fn extraction_field(&self) -> Option<&str> {
        match self {
            Self::Extraction { field, .. } => Some(field),
            _ => None,
        }
    }
}
