pub mod user_follow;

pub use user_follow::*;
