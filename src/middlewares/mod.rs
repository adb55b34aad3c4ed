//! 요청 파이프라인 미들웨어
//!
//! - [`AuthMiddleware`]: 토큰 검증 후 `AuthenticatedUser`를 request extensions에 저장.
//!   `required()`는 401, `required_with_role()`은 역할이 없으면 403.

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::{AuthMiddleware, IdentityResolver};
