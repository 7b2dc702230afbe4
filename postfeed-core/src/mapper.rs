//! Conversion from stored records to domain posts.

use crate::models::{Post, PostRecord};
use crate::sync::SyncError;

/// Maps records to posts, preserving order.
///
/// An empty collection is [`SyncError::EmptyData`], never an empty success.
pub fn map_records(records: Vec<PostRecord>) -> Result<Vec<Post>, SyncError> {
    if records.is_empty() {
        return Err(SyncError::EmptyData);
    }
    Ok(records.into_iter().map(Post::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_empty_data() {
        assert_eq!(map_records(Vec::new()), Err(SyncError::EmptyData));
    }

    #[test]
    fn test_fields_preserved_in_order() {
        let records = vec![
            PostRecord::new(5, 1, "five").with_row_id(10).with_view_count(2),
            PostRecord::new(3, 2, "three").with_favorite(true),
            PostRecord::new(9, 1, "nine").with_view_count(u32::MAX),
        ];

        let posts = map_records(records).unwrap();

        assert_eq!(
            posts,
            vec![
                Post::new(5, 1, "five").with_view_count(2),
                Post::new(3, 2, "three").with_favorite(true),
                Post::new(9, 1, "nine").with_view_count(u32::MAX),
            ]
        );
    }
}
