//! # 설정
//!
//! - [`auth_config`]: 토큰 서명 키, 토큰 수명, Google 클라이언트, 인증 프로바이더
//! - [`data_config`]: 실행 환경, MongoDB, Redis, 서버, CORS, 요청 제한
//!
//! 모든 값은 환경 변수(`.env`, `.env.dev`, `.env.prod`)에서 읽습니다.

pub mod auth_config;
pub mod data_config;

pub use auth_config::*;
pub use data_config::*;
