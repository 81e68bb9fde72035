//! Errors raised by a single form submission.
//!
//! The user only ever sees two kinds of failure: the input text was not JSON,
//! or the call to the endpoint went wrong. [`SubmitError`] keeps the finer
//! detail for logging while [`ErrorKind`] collapses it to those two.

use serde::Serialize;
use thiserror::Error;

/// User-facing error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The raw input text did not parse as JSON.
    InvalidInput,
    /// The endpoint answered with a non-success status, could not be
    /// reached, or sent back a body that would not decode.
    Api,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "invalid_input"),
            Self::Api => write!(f, "api"),
        }
    }
}

/// Failure of one submit attempt.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Invalid JSON input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("API error")]
    Api { status: u16 },

    #[error("API request failed: {0}")]
    Transport(String),

    #[error("API returned an unreadable response: {0}")]
    Decode(String),
}

impl SubmitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Api { .. } | Self::Transport(_) | Self::Decode(_) => ErrorKind::Api,
        }
    }

    /// HTTP status that caused the failure, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status } => Some(*status),
            _ => None,
        }
    }
}
