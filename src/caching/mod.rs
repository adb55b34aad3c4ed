//! 캐시 계층
//!
//! 현재는 사용자 레코드 read-through 캐시(Redis)만 사용합니다.
//! 키 형식은 `user_repository:<id>`, `user_repository:email:<email>` 입니다.

pub mod redis;
