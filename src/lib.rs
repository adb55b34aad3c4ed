//! 게임 커뮤니티 백엔드
//!
//! 로컬 계정과 Google 로그인, 게임 랭킹을 붙일 수 있는 게시글, 댓글, 팔로우를 제공하는
//! Actix-web + MongoDB 서비스입니다. 리포지토리와 서비스는 싱글톤 매크로로 등록되고
//! `ServiceLocator`를 통해 서로 주입됩니다.
//!
//! # 계층
//!
//! ```text
//! routes       /api/{auth,users,posts,comments,follow,rankings,admin} + AuthMiddleware
//!   └ handlers     JSON 추출 → 서비스 호출 → HttpResponse
//!       └ services     AuthService(AuthFlow), PostService, CommentService, FollowService, ...
//!           └ repositories  컬렉션별 #[repository] 싱글톤 (UserRepository는 UserStore 구현)
//!               └ db / caching  MongoDB, Redis(사용자 캐시)
//! ```
//!
//! ```rust,ignore
//! use game_social_backend::services::auth::AuthService;
//!
//! let session = AuthService::instance().login(request).await?;
//! let current = AuthService::instance().authenticate(Some(&header)).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
