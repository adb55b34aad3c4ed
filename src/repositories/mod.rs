//! # 리포지토리 계층
//!
//! 컬렉션마다 `#[repository]` 싱글톤 하나를 둡니다. 매크로가 `db` 필드에 `Database`를,
//! `redis` 필드에 `RedisClient`를 주입하고 `collection::<T>()` 헬퍼를 생성합니다.
//!
//! 인증 코어와 게시글/팔로우/계정 삭제 흐름은 MongoDB에 직접 묶이지 않도록
//! [`users::UserStore`], [`posts::PostStore`], [`comments::CommentStore`], [`follows::FollowStore`]
//! 트레이트를 통해 저장소에 접근합니다.

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;

pub mod comments;
pub mod follows;
pub mod posts;
pub mod rankings;
pub mod users;

#[cfg(test)]
pub mod memory_social_store;

/// 경로 파라미터 등 외부 입력 문자열을 `ObjectId`로 변환합니다.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::ValidationError(format!("유효하지 않은 ID 형식입니다: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_ids() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
        assert!(matches!(parse_object_id("42"), Err(AppError::ValidationError(_))));
    }
}
