pub mod follow_repo;
pub mod follow_store;

pub use follow_repo::UserFollowRepository;
pub use follow_store::FollowStore;
