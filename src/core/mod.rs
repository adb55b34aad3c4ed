//! # Core
//!
//! - [`registry`]: `#[service]` / `#[repository]` 싱글톤을 찾아주는 `ServiceLocator`
//! - [`errors`]: 전 계층 공통 `AppError`와 HTTP 응답 매핑
//!
//! ```rust,ignore
//! #[repository(name = "post", collection = "posts")]
//! pub struct PostRepository {
//!     db: Arc<Database>,
//! }
//!
//! #[service(name = "post")]
//! pub struct PostService {
//!     post_repo: Arc<PostRepository>, // ServiceLocator가 주입
//! }
//!
//! let posts = PostService::instance();
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
