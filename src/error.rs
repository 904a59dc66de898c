use thiserror::Error;

use crate::session::SessionStatus;

/// Failure reported by an [`ArticleSource`](crate::source::ArticleSource).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    #[error("article source is empty")]
    Empty,

    #[error("language `{0}` not found")]
    LanguageNotFound(String),

    #[error("unable to read articles: {0}")]
    Unreadable(String),
}

#[derive(Debug, Error)]
pub enum Error {
    /// A controller operation was sequenced against the wrong session state.
    #[error("invariant violation: cannot {operation} while session is {status}")]
    InvariantViolation {
        operation: &'static str,
        status: SessionStatus,
    },

    #[error("failed to fetch articles: {0}")]
    Fetch(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
