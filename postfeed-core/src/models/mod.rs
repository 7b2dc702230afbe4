mod post;
mod post_record;

pub use post::Post;
pub use post_record::PostRecord;
