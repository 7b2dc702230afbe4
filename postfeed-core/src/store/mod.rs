//! Local cache of post records.
//!
//! The store is a key-less collection: it is read as a whole, cleared as a
//! whole and filled in bulk. Writes from the sync policy always go through
//! [`LocalStore::replace_all`], so a store is never partially overwritten.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::PostRecord;

pub use memory::MemoryStore;

/// Errors raised by a local store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Returns every stored record in insertion order.
    async fn read_all(&self) -> Result<Vec<PostRecord>, StoreError>;

    async fn delete_all(&self) -> Result<(), StoreError>;

    async fn insert_all(&self, records: &[PostRecord]) -> Result<(), StoreError>;

    /// Replaces the whole collection with `records`.
    ///
    /// The default clears and then inserts. Backends that can do both in a
    /// single transaction should override it.
    async fn replace_all(&self, records: &[PostRecord]) -> Result<(), StoreError> {
        self.delete_all().await?;
        self.insert_all(records).await
    }
}
