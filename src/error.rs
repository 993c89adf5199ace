//! Error types for article-repo
//!
//! This module provides the error taxonomy surfaced by the repository:
//! - [`FetchError`] for remote news source failures
//! - [`PersistenceError`] for favorite store failures
//! - [`Error::UnknownArticle`] for toggles that reference an article outside the snapshot
//!
//! Collaborator errors are wrapped, never swallowed, so callers can tell a
//! retryable network failure apart from a rejected toggle.

use crate::types::ArticleId;
use thiserror::Error;

/// Result type alias for article-repo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for article-repo
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching the remote article list failed
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Reading or writing the favorite store failed
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Toggle referenced an article that is not in the current snapshot
    #[error("unknown article: {0}")]
    UnknownArticle(ArticleId),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "source.url")
        key: Option<String>,
    },
}

impl Error {
    /// Whether retrying the failed call may succeed
    ///
    /// Only transient fetch failures qualify. Presentation layers use this to
    /// decide whether to offer a retry affordance.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Fetch(e) => e.is_retryable(),
            Error::Persistence(_) | Error::UnknownArticle(_) | Error::Config { .. } => false,
        }
    }
}

/// Remote fetch failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection failure, request failure, or non-success HTTP status
    #[error("network failure: {0}")]
    Network(String),

    /// The request did not complete in time
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The response body could not be decoded into articles
    #[error("failed to decode articles: {0}")]
    Deserialize(String),
}

impl FetchError {
    /// Transient failures worth retrying (network and timeout)
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Timeout(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_decode() {
            FetchError::Deserialize(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Favorite store failures
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Failed to open or connect to the backing database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to run migrations
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// The store refused the operation (closed, read-only, injected failure)
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
