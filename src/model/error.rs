//! Error types for the plant catalog client.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main` and the runtime shell
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing subscriber setup failures
//!   - `std::io::Error` - Terminal I/O failures in the command shell
//!   - `tokio::task::JoinError` - The session task did not finish cleanly
//! - [`FetchError`] - A catalog request failed (transport, status, decode)
//! - [`FieldError`] - A user-supplied field value failed local validation
//!
//! # Error Recovery Strategy
//!
//! Fetch failures are **non-fatal**: they are stored in the catalog state as a
//! message with a retry affordance, and the previously displayed plants stay
//! visible. Field errors never reach the query builder; the edit is rejected
//! and the last valid value is kept. Only startup failures are fatal.

use std::fmt;
use thiserror::Error;

/// Top-level application error.
///
/// All startup and shell failures convert into `AppError` via `From`, so
/// `main` can propagate with `?`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or contained invalid values.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[from] crate::api::ApiError),

    /// Reading commands or writing output failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The catalog session task panicked or was cancelled.
    #[error("Catalog session failed: {0}")]
    Session(#[from] tokio::task::JoinError),
}

/// A failed catalog request, in a form that can be stored in UI state.
///
/// Carries strings rather than the underlying `reqwest` error so the value is
/// `Clone + PartialEq` and can be shown to the user verbatim.
///
/// # Examples
///
/// ```
/// use plant_catalog::model::error::FetchError;
///
/// let err = FetchError::Status { status: 503, body: "maintenance".into() };
/// assert_eq!(err.user_message(), "Server responded with status 503");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (connection refused, DNS, TLS, timeout).
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status code.
    #[error("Server error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for the log file.
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Short message suitable for the error banner.
    ///
    /// Response bodies are logged, not shown.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Transport(_) => {
                "Failed to reach the plant catalog. Check your connection and retry.".to_string()
            }
            FetchError::Status { status, .. } => {
                format!("Server responded with status {status}")
            }
            FetchError::Decode(_) => "The server sent an unexpected response".to_string(),
        }
    }
}

/// Names of user-editable fields that can carry a validation message.
///
/// Covers both the filter panel and the add-plant form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    /// Minimum price filter.
    MinPrice,
    /// Maximum price filter.
    MaxPrice,

    /// Plant name.
    Name,
    /// Plant price.
    Price,
    /// Category list.
    Categories,
    /// Units in stock.
    Stock,
    /// Image URL.
    Image,
    /// Free-text description.
    Description,
}

impl FieldName {
    /// Wire/form name of the field (camelCase, as the API spells it).
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::MinPrice => "minPrice",
            FieldName::MaxPrice => "maxPrice",
            FieldName::Name => "name",
            FieldName::Price => "price",
            FieldName::Categories => "categories",
            FieldName::Stock => "stock",
            FieldName::Image => "image",
            FieldName::Description => "description",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local validation failure attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Field the message belongs to.
    pub field: FieldName,
    /// Human-readable explanation shown next to the field.
    pub message: String,
}

impl FieldError {
    /// Attach `message` to `field`.
    pub fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
