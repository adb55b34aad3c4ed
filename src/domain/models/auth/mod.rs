pub mod authenticated_user;
pub mod required_role;

pub use authenticated_user::*;
pub use required_role::*;
