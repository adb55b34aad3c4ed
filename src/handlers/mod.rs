//! # HTTP 핸들러
//!
//! 요청 본문/경로를 추출해 서비스에 넘기고, 결과를 JSON으로 돌려주는 얇은 계층입니다.
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며 에러 변환은 `ResponseError`가 맡습니다.
//!
//! 인증이 필요한 핸들러는 `AuthenticatedUser` 인자로 현재 사용자를 받습니다.
//! 해당 스코프에는 `routes`에서 `AuthMiddleware`가 걸려 있어야 합니다.

pub mod admin;
pub mod auth;
pub mod comments;
pub mod follows;
pub mod posts;
pub mod rankings;
pub mod users;
