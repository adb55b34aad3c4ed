pub mod post_repo;
pub mod post_store;

pub use post_repo::PostRepository;
pub use post_store::PostStore;
