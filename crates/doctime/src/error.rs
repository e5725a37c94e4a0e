//! Error types for doctime codecs.

use thiserror::Error;

/// Result type alias for doctime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding time values.
///
/// Every operation is pure and deterministic, so none of these are
/// retryable: the same input fails the same way.
#[derive(Debug, Error)]
pub enum Error {
    // =========================================================================
    // Wire Format Errors
    // =========================================================================
    /// A composite value was missing one of its required fields.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An offset date-time string could not be parsed.
    #[error("invalid offset date-time '{value}': {reason}")]
    InvalidDateTime { value: String, reason: String },

    /// An offset string or value was outside `[-18:00:00, +18:00:00]`.
    #[error("invalid offset '{0}'")]
    InvalidOffset(String),

    /// A period string did not follow the roundtrip period pattern.
    #[error("invalid period '{value}': {reason}")]
    InvalidPeriod { value: String, reason: String },

    // =========================================================================
    // Zone Errors
    // =========================================================================
    /// The zone provider does not know the given zone id.
    #[error("unrecognized time zone id '{0}'")]
    UnrecognizedZoneId(String),

    // =========================================================================
    // Range Errors
    // =========================================================================
    /// A local date-time cannot carry the requested offset.
    #[error("value out of range: {0}")]
    OutOfRange(String),

    // =========================================================================
    // JSON Errors
    // =========================================================================
    /// Error from the serde_json layer.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a period parse error.
    pub fn period(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an offset date-time parse error.
    pub fn date_time(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDateTime {
            value: value.into(),
            reason: reason.into(),
        }
    }
}
