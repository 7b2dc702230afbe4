//! Sync error types.

use thiserror::Error;

use crate::remote::NetworkError;
use crate::store::StoreError;

/// Errors returned by the sync policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Neither source produced any posts
    #[error("No posts available")]
    EmptyData,

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
