use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{LocalStore, StoreError};
use crate::models::PostRecord;

/// In-memory [`LocalStore`], assigning row ids the way a database would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<PostRecord>,
    next_row_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `records`.
    pub fn with_records(records: Vec<PostRecord>) -> Self {
        let mut inner = Inner::default();
        inner.push_all(&records);
        Self {
            inner: RwLock::new(inner),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}

impl Inner {
    fn push_all(&mut self, records: &[PostRecord]) {
        for record in records {
            self.next_row_id += 1;
            let mut stored = record.clone();
            stored.row_id = Some(self.next_row_id);
            self.records.push(stored);
        }
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn read_all(&self) -> Result<Vec<PostRecord>, StoreError> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.inner.write().await.records.clear();
        Ok(())
    }

    async fn insert_all(&self, records: &[PostRecord]) -> Result<(), StoreError> {
        self.inner.write().await.push_all(records);
        Ok(())
    }

    async fn replace_all(&self, records: &[PostRecord]) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.records.clear();
        inner.push_all(records);
        Ok(())
    }
}
