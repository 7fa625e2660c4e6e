//! Series provider trait and structured error types.
//!
//! The SeriesProvider trait abstracts over where raw series payloads come from
//! (the statistics API, or a fixture in tests). The cache layer sits above this
//! trait; providers don't know about the cache.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error types for network and cache operations.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("request timed out after {secs}s: {url}")]
    Timeout { url: String, secs: u64 },

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("unparsable response: {0}")]
    InvalidResponse(String),

    #[error("statistics API rejected the request ({status}): {}", messages.join("; "))]
    ApiRejected {
        status: String,
        messages: Vec<String>,
    },

    #[error("cache error: {0}")]
    CacheError(String),
}

impl DataError {
    /// Failures that happened on the wire rather than in the payload or cache.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            DataError::Timeout { .. }
                | DataError::NetworkUnreachable(_)
                | DataError::HttpStatus { .. }
        )
    }
}

/// What to ask the statistics API for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub series_ids: Vec<String>,
    pub start_year: i32,
    pub end_year: i32,
}

impl SeriesRequest {
    pub fn new(series_ids: Vec<String>, start_year: i32, end_year: i32) -> Self {
        Self {
            series_ids,
            start_year,
            end_year,
        }
    }
}

/// Trait for raw series payload sources.
///
/// Implementations return the response body verbatim. Validation of the body
/// happens in the cache layer before anything is persisted.
pub trait SeriesProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the raw payload for a request.
    fn fetch_raw(&self, request: &SeriesRequest) -> Result<String, DataError>;
}
