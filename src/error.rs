//! Error taxonomy for the collector.
//!
//! Faults from the API layer either terminate the run (auth, unknown forum,
//! malformed payloads, CSV/IO failures) or are transient and eligible for the
//! bounded retry loop in the client. Nothing is ever written to disk after an
//! unrecovered fault.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for collector operations.
pub type Result<T> = std::result::Result<T, CollectError>;

#[derive(Debug, Error)]
pub enum CollectError {
    /// Credential or token failure. Never retried.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The requested subreddit does not exist (or is unreachable by name).
    #[error("subreddit not found: {0}")]
    ForumNotFound(String),

    /// 429 from the API. `retry_after` carries the server hint when present.
    #[error("rate limited by the API")]
    RateLimited { retry_after: Option<Duration> },

    /// Non-success HTTP status that is neither auth nor rate limiting.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a payload we cannot decode.
    #[error("unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Transient vs permanent classification driving the client's retry loop.
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for CollectError {
    fn is_retryable(&self) -> bool {
        match self {
            CollectError::RateLimited { .. } => true,
            CollectError::Http { status, .. } => *status >= 500,
            CollectError::Network(e) => e.is_timeout() || e.is_connect(),
            CollectError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::ConnectionRefused
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::Interrupted
            ),
            CollectError::Auth(_)
            | CollectError::ForumNotFound(_)
            | CollectError::Decode(_)
            | CollectError::Csv(_)
            | CollectError::Config(_) => false,
        }
    }
}
