//! Error types for the sift application layer.
//!
//! Stage failures never abort a research request; they are logged and turn
//! into empty values. These variants describe why, for diagnostics, and
//! report startup problems such as missing API keys.

use sift_search::{FailureKind, SearchError};

/// Top-level error type for configuration, summarisation and serving.
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// A required setting (API key) is absent.
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    /// A setting is present but invalid, or the config file cannot be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Network failure or timeout talking to an external service.
    #[error("transport error: {0}")]
    Transport(String),

    /// An external service answered with a non-success HTTP status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// An external service answered with an unexpected payload shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The form endpoint could not be started.
    #[error("server error: {0}")]
    Server(String),

    /// Search, fetch or extraction failure.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResearchError {
    /// Classify a stage failure, if this error is one.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Transport(_) => Some(FailureKind::TransportFailure),
            Self::Status(_) => Some(FailureKind::NonSuccessStatus),
            Self::MalformedResponse(_) => Some(FailureKind::MalformedResponse),
            Self::Search(err) => Some(err.kind()),
            Self::MissingConfiguration(_) | Self::Config(_) | Self::Server(_) | Self::Io(_) => {
                None
            }
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ResearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_configuration() {
        let err = ResearchError::MissingConfiguration("GEMINI_API_KEY".into());
        assert_eq!(err.to_string(), "missing configuration: GEMINI_API_KEY");
    }

    #[test]
    fn search_errors_display_transparently() {
        let err: ResearchError = SearchError::Status(429).into();
        assert_eq!(err.to_string(), "HTTP status 429");
        assert_eq!(err.failure_kind(), Some(FailureKind::NonSuccessStatus));
    }

    #[test]
    fn failure_kind_for_stage_errors() {
        assert_eq!(
            ResearchError::MalformedResponse("no candidates".into()).failure_kind(),
            Some(FailureKind::MalformedResponse)
        );
        assert_eq!(
            ResearchError::Transport("reset".into()).failure_kind(),
            Some(FailureKind::TransportFailure)
        );
        assert_eq!(ResearchError::Config("bad".into()).failure_kind(), None);
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResearchError>();
    }
}
