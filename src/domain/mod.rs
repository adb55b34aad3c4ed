//! # 도메인 계층
//!
//! ```text
//! domain
//! ├── entities/  MongoDB 문서 (User, Post, Comment, UserFollow, GameRanking)
//! ├── models/    저장되지 않는 값 객체 (인증 주체, 토큰 클레임, OAuth 신원, 게임 분류)
//! └── dto/       HTTP 요청/응답
//! ```

pub mod dto;
pub mod entities;
pub mod models;
