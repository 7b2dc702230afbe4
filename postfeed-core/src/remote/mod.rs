//! Remote source of truth for the post feed.

mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::PostRecord;

pub use http::{HttpRemoteSource, DEFAULT_TIMEOUT};

/// Errors raised while fetching from the remote source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid remote URL: {0}")]
    InvalidUrl(String),
}

#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetches the authoritative list of posts.
    async fn fetch_all(&self) -> Result<Vec<PostRecord>, NetworkError>;
}

#[async_trait]
impl<T: RemoteSource + ?Sized> RemoteSource for Box<T> {
    async fn fetch_all(&self) -> Result<Vec<PostRecord>, NetworkError> {
        (**self).fetch_all().await
    }
}

/// Remote source used when no server is configured. Every fetch fails, so
/// callers fall back to whatever the local cache holds.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredRemote;

#[async_trait]
impl RemoteSource for UnconfiguredRemote {
    async fn fetch_all(&self) -> Result<Vec<PostRecord>, NetworkError> {
        Err(NetworkError::InvalidUrl(
            "no remote base_url configured".to_string(),
        ))
    }
}
