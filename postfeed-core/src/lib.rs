//! postfeed core library
//!
//! Post models, the local/remote collaborator traits and the sync policy
//! that reconciles them.

pub mod feed;
pub mod mapper;
pub mod models;
pub mod remote;
pub mod store;
pub mod sync;

pub use feed::FeedState;
pub use mapper::map_records;
pub use models::{Post, PostRecord};
pub use remote::{HttpRemoteSource, NetworkError, RemoteSource, UnconfiguredRemote};
pub use store::{LocalStore, MemoryStore, StoreError};
pub use sync::{ParseStrategyError, PostSync, Strategy, SyncError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
