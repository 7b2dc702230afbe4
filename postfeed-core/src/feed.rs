//! Presentation state for a one-shot feed load.

use serde::Serialize;

use crate::models::Post;
use crate::sync::SyncError;

/// Message shown when no source produced any posts.
pub const EMPTY_FEED_MESSAGE: &str = "No posts available. Check your connection and try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum FeedState {
    /// The fetch has not produced a value yet
    Loading,
    Success(Vec<Post>),
    Error(String),
}

impl FeedState {
    pub fn from_result(result: Result<Vec<Post>, SyncError>) -> Self {
        match result {
            Ok(posts) => FeedState::Success(posts),
            Err(SyncError::EmptyData) => FeedState::Error(EMPTY_FEED_MESSAGE.to_string()),
            Err(e) => FeedState::Error(e.to_string()),
        }
    }

    pub fn posts(&self) -> Option<&[Post]> {
        match self {
            FeedState::Success(posts) => Some(posts),
            _ => None,
        }
    }
}
