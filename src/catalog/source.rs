//! Catalog Source Contracts
//!
//! The search controller only talks to the catalog through these traits, so
//! tests can swap the HTTP client for in-memory fakes.

use super::types::Card;

use async_trait::async_trait;
use thiserror::Error;

/// Failure taxonomy for catalog fetches.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// The set or card does not exist (HTTP 404).
    #[error("not found")]
    NotFound,
    /// The API asked us to slow down (HTTP 429).
    #[error("rate limited")]
    RateLimited,
    /// Network failure, timeout or 5xx response.
    #[error("transient failure: {0}")]
    Transient(String),
    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// NotFound and RateLimited are expected during exploratory lookups and
    /// are treated as empty results without surfacing an error.
    pub fn is_expected(&self) -> bool {
        matches!(self, FetchError::NotFound | FetchError::RateLimited)
    }

    pub fn is_hard(&self) -> bool {
        !self.is_expected()
    }
}

/// Returns every card of one set in a single call.
///
/// Implementations must be idempotent and safe to retry.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, set_code: &str) -> Result<Vec<Card>, FetchError>;
}

/// Looks up a single card by its card code.
#[async_trait]
pub trait ItemDetailSource: Send + Sync {
    async fn fetch_item(&self, card_code: &str) -> Result<Card, FetchError>;
}
