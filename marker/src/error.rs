//! Marker Error Types
//!
//! [`MarkerError`] covers everything that can go wrong while asking an external
//! model to grade a submission. The text heuristics themselves never fail; only the
//! grading call (transport, upstream status, response decoding) produces errors.

use thiserror::Error;

/// Represents all error types that can occur in the marker system.
#[derive(Debug, Error)]
pub enum MarkerError {
    /// No API key is configured for the grading service.
    #[error("grading service API key is not configured")]
    MissingApiKey,
    /// The request could not be sent or the connection failed.
    #[error("grading request failed: {0}")]
    Transport(String),
    /// The grading service answered with a non-success status.
    #[error("grading service returned {status}: {body}")]
    Upstream { status: u16, body: String },
    /// The grading service answered with a body we could not decode.
    #[error("invalid grading response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for MarkerError {
    fn from(err: reqwest::Error) -> Self {
        MarkerError::Transport(err.to_string())
    }
}
