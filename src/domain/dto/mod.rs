//! # DTO
//!
//! HTTP 경계에서만 쓰이는 요청/응답 구조체입니다. 요청 DTO는 `validator`로 검증하고,
//! 응답 DTO는 엔티티에서 필요한 필드만 평탄하게 뽑아 만듭니다 (camelCase 키).

pub mod comments;
pub mod follows;
pub mod posts;
pub mod rankings;
pub mod users;
