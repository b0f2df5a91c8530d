//! Error types for the sift-search crate.
//!
//! Errors never cross a stage boundary as faults: every public stage
//! operation logs them and degrades to an empty value. They exist so
//! callers and tests can tell "no data" apart from "service error".
//! No API keys appear in error messages.

use std::fmt;

/// Errors that can occur while searching, fetching, or extracting.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Network failure, timeout, or an unusable URL.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote service answered with a non-success HTTP status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Coarse failure classification used in logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Network error or timeout.
    TransportFailure,
    /// HTTP 4xx/5xx (or any non-200 for page fetches).
    NonSuccessStatus,
    /// Unexpected payload shape.
    MalformedResponse,
    /// Settings rejected before any request was made.
    Configuration,
}

impl SearchError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) => FailureKind::TransportFailure,
            Self::Status(_) => FailureKind::NonSuccessStatus,
            Self::MalformedResponse(_) => FailureKind::MalformedResponse,
            Self::Config(_) => FailureKind::Configuration,
        }
    }

    /// Map a `reqwest` error to a transport failure, keeping the timeout hint.
    pub(crate) fn from_reqwest(context: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("{context}: timed out"))
        } else {
            Self::Transport(format!("{context}: {err}"))
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TransportFailure => "transport_failure",
            Self::NonSuccessStatus => "non_success_status",
            Self::MalformedResponse => "malformed_response",
            Self::Configuration => "configuration",
        })
    }
}

/// Convenience type alias for sift-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
