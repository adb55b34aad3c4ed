//! # 도메인 모델
//!
//! 저장되지 않는 값 객체들입니다.
//!
//! - [`auth`]: 요청 단위 인증 주체(`AuthenticatedUser`)와 스코프 역할 요구
//! - [`token`]: 세션 토큰 클레임
//! - [`oauth`]: Google ID 토큰 클레임과 검증된 외부 신원
//! - [`game`]: 게임 분류(`GameType`), 랭킹 표기(`RankingType`)

pub mod auth;
pub mod game;
pub mod oauth;
pub mod token;
