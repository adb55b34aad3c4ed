//! 비즈니스 로직 계층
//!
//! 모든 서비스는 `#[service]` 싱글톤이며 필요한 리포지토리/서비스를 `Arc` 필드로 주입받습니다.
//!
//! ```rust,ignore
//! let posts = PostService::instance();
//! let feed = posts.list_following(&current_user).await?;
//! ```

pub mod auth;
pub mod comments;
pub mod follows;
pub mod posts;
pub mod rankings;
pub mod users;
