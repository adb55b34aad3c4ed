//! # 엔티티
//!
//! MongoDB 컬렉션과 1:1로 대응되는 문서 구조체입니다.
//!
//! ```text
//! users          ← User          (email unique)
//! posts          ← Post          (user_id, ranking_id 참조)
//! comments       ← Comment       (post_id, user_id 참조)
//! user_follows   ← UserFollow    ((follower_id, following_id) unique)
//! game_rankings  ← GameRanking
//! ```
//!
//! 엔티티끼리는 `ObjectId`로만 참조하며 서로를 내장하지 않습니다.
//! 응답에 필요한 연관 데이터는 서비스 계층에서 DTO로 조립합니다.

pub mod comments;
pub mod follows;
pub mod posts;
pub mod rankings;
pub mod users;

pub use comments::*;
pub use follows::*;
pub use posts::*;
pub use rankings::*;
pub use users::*;
