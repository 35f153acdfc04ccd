//! Defines the crate's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.

use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all crate-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Transport failure talking to the GIOS API (`reqwest`): unreachable host,
    /// non-success status or a body that is not JSON.
    #[error("API Error: {0}")]
    Api(Arc<reqwest::Error>),

    /// The response body was JSON but did not have the expected shape.
    #[error("Decode Error: {0}")]
    Decode(#[from] DecodeError),

    /// Error during JSON (de)serialization (`serde_json`). Wrapped in Arc as serde_json::Error is not Clone.
    #[error("JSON Parsing Error: {0}")]
    JsonParse(Arc<serde_json::Error>),

    /// Error related to accessing environment variables.
    #[error("Environment Error: {0}")]
    Env(#[from] std::env::VarError),
}

/// Why a response body could not be turned into an `AirQuality` record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("invalid value for field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("invalid date string `{value}` in field `{field}`")]
    InvalidDate { field: String, value: String },

    #[error("timestamp {millis} in field `{field}` is out of range")]
    TimestampOutOfRange { field: String, millis: i64 },
}

/// A specialized `Result` type using the crate's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Api(Arc::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonParse(Arc::new(err))
    }
}
