use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppResult;

/// 게시글/계정 삭제 시 댓글 정리에 쓰는 저장소 추상화
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn delete_by_post(&self, post_id: &ObjectId) -> AppResult<u64>;

    /// 사용자가 쓴 댓글과 `post_ids` 게시글에 달린 댓글을 모두 지운다.
    async fn delete_for_user(&self, user_id: &ObjectId, post_ids: &[ObjectId]) -> AppResult<u64>;
}
