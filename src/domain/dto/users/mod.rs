//! 사용자/인증 DTO
//!
//! 응답 DTO는 `password_hash`, `provider_id` 같은 내부 필드를 절대 포함하지 않습니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
