//! Cache/remote reconciliation for the post feed.
//!
//! Two strategies are offered:
//!
//! - **offline-last**: ask the remote first, persist what it returns and
//!   serve the read-back from the cache. The cache is only used when the
//!   remote or the store write fails.
//! - **offline-first**: serve the cache when it has anything in it. The
//!   remote is consulted only for an empty cache.
//!
//! Both produce exactly one result per call.

mod error;
mod policy;

pub use error::SyncError;
pub use policy::{ParseStrategyError, PostSync, Strategy};
