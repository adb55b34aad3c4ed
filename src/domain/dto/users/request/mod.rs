pub mod auth_request;
pub mod profile_request;

pub use auth_request::*;
pub use profile_request::*;
