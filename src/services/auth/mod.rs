//! 인증 서비스
//!
//! - [`password_service`]: bcrypt 해시/검증
//! - [`token_service`]: HS256 세션 토큰 발급/검증, `Bearer` 헤더 파싱
//! - [`google_auth_service`]: Google ID 토큰 검증 (`AssertionVerifier`)
//! - [`auth_service`]: 회원가입, 로그인, 현재 사용자 확인, 외부 신원 연동

pub mod auth_service;
pub mod google_auth_service;
pub mod password_service;
pub mod token_service;

pub use auth_service::*;
pub use google_auth_service::*;
pub use password_service::*;
pub use token_service::*;
