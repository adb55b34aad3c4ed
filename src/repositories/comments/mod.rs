pub mod comment_repo;
pub mod comment_store;

pub use comment_repo::{CommentRepository, CommentStats};
pub use comment_store::CommentStore;
