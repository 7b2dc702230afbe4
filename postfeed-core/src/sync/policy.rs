use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;

use super::error::SyncError;
use crate::mapper::map_records;
use crate::models::{Post, PostRecord};
use crate::remote::RemoteSource;
use crate::store::LocalStore;

/// Which source wins when producing the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Serve the cache, hit the remote only when the cache is empty
    #[default]
    #[serde(alias = "local")]
    OfflineFirst,
    /// Serve the remote, fall back to the cache on failure
    #[serde(alias = "remote")]
    OfflineLast,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::OfflineFirst => write!(f, "offline-first"),
            Strategy::OfflineLast => write!(f, "offline-last"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid strategy '{0}'. Valid values: offline-first, offline-last")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "offline-first" | "local" => Ok(Strategy::OfflineFirst),
            "offline-last" | "remote" => Ok(Strategy::OfflineLast),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Reconciles a local cache with a remote source.
///
/// Each operation yields exactly one value or one error. Overlapping calls
/// are not coordinated: two concurrent refreshes both replace the cache and
/// the last write wins.
pub struct PostSync<L, R> {
    local: L,
    remote: R,
}

impl<L: LocalStore, R: RemoteSource> PostSync<L, R> {
    pub fn new(local: L, remote: R) -> Self {
        Self { local, remote }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Runs the operation selected by `strategy`.
    pub async fn fetch(&self, strategy: Strategy) -> Result<Vec<Post>, SyncError> {
        match strategy {
            Strategy::OfflineFirst => self.fetch_offline_first().await,
            Strategy::OfflineLast => self.fetch_offline_last().await,
        }
    }

    /// Same as [`fetch_offline_last`](Self::fetch_offline_last).
    pub async fn fetch_posts(&self) -> Result<Vec<Post>, SyncError> {
        self.fetch_offline_last().await
    }

    /// Remote-preferred fetch.
    ///
    /// A non-empty remote response replaces the cache and the result is read
    /// back from the cache. An empty response is `EmptyData` and leaves the
    /// cache alone. Network or store failures fall back to the current cache
    /// contents; a failure of that fallback read is returned.
    pub async fn fetch_offline_last(&self) -> Result<Vec<Post>, SyncError> {
        let records = match self.refresh_with_read_back().await {
            Ok(records) => records,
            Err(SyncError::EmptyData) => {
                tracing::warn!("Remote returned no posts");
                return Err(SyncError::EmptyData);
            }
            Err(e) => {
                tracing::warn!("Refresh failed, falling back to local cache: {}", e);
                self.local.read_all().await?
            }
        };

        map_records(records)
    }

    /// Local-preferred fetch.
    ///
    /// A non-empty cache is returned as is and the remote is never called.
    /// Otherwise the remote response replaces the cache and is returned
    /// directly, without reading it back. Any failure along the way counts
    /// as an empty collection, which ends in `EmptyData`.
    pub async fn fetch_offline_first(&self) -> Result<Vec<Post>, SyncError> {
        let cached = self.local.read_all().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to read local cache, treating as empty: {}", e);
            Vec::new()
        });

        let records = if cached.is_empty() {
            self.refresh().await.unwrap_or_else(|e| {
                tracing::warn!("Refresh failed, treating as empty: {}", e);
                Vec::new()
            })
        } else {
            tracing::debug!("Serving {} cached post(s)", cached.len());
            cached
        };

        map_records(records)
    }

    async fn refresh_with_read_back(&self) -> Result<Vec<PostRecord>, SyncError> {
        let fetched = self.remote.fetch_all().await?;
        if fetched.is_empty() {
            return Err(SyncError::EmptyData);
        }

        self.local.replace_all(&fetched).await?;
        tracing::info!("Replaced local cache with {} post(s)", fetched.len());

        Ok(self.local.read_all().await?)
    }

    async fn refresh(&self) -> Result<Vec<PostRecord>, SyncError> {
        let fetched = self.remote.fetch_all().await?;
        self.local.replace_all(&fetched).await?;
        tracing::info!("Replaced local cache with {} post(s)", fetched.len());
        Ok(fetched)
    }
}

impl<L, R> PostSync<L, R>
where
    L: LocalStore + 'static,
    R: RemoteSource + 'static,
{
    /// Runs the fetch on the runtime's worker pool. The handle resolves once
    /// with the result.
    pub fn spawn(self: Arc<Self>, strategy: Strategy) -> JoinHandle<Result<Vec<Post>, SyncError>> {
        tokio::spawn(async move { self.fetch(strategy).await })
    }
}
