use serde::{Deserialize, Serialize};

use super::post::Post;

/// Storage and wire representation of a [`Post`].
///
/// `row_id` is assigned by the local store and never travels over the wire;
/// records fetched from the remote source carry `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(skip)]
    pub row_id: Option<i64>,
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub view_count: u32,
    #[serde(default)]
    pub favorite: bool,
}

impl PostRecord {
    pub fn new(id: i64, user_id: i64, title: impl Into<String>) -> Self {
        Self {
            row_id: None,
            id,
            user_id,
            title: title.into(),
            view_count: 0,
            favorite: false,
        }
    }

    pub fn with_view_count(mut self, view_count: u32) -> Self {
        self.view_count = view_count;
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn with_row_id(mut self, row_id: i64) -> Self {
        self.row_id = Some(row_id);
        self
    }

    /// Compares the post fields, ignoring the storage row id.
    pub fn same_post(&self, other: &PostRecord) -> bool {
        self.id == other.id
            && self.user_id == other.user_id
            && self.title == other.title
            && self.view_count == other.view_count
            && self.favorite == other.favorite
    }
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        Post {
            id: record.id,
            user_id: record.user_id,
            title: record.title,
            view_count: record.view_count,
            favorite: record.favorite,
        }
    }
}

impl From<&Post> for PostRecord {
    fn from(post: &Post) -> Self {
        PostRecord {
            row_id: None,
            id: post.id,
            user_id: post.user_id,
            title: post.title.clone(),
            view_count: post.view_count,
            favorite: post.favorite,
        }
    }
}
