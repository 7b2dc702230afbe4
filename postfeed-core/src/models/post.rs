use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's post as shown in the feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    /// How many times the post's content has been viewed
    pub view_count: u32,
    pub favorite: bool,
}

impl Post {
    pub fn new(id: i64, user_id: i64, title: impl Into<String>) -> Self {
        Self {
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
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let star = if self.favorite { "*" } else { " " };
        write!(
            f,
            "{} #{:<6} {} (user {}, {} view{})",
            star,
            self.id,
            self.title,
            self.user_id,
            self.view_count,
            if self.view_count == 1 { "" } else { "s" }
        )
    }
}
