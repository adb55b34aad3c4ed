//! 팔로우 관계 저장소 추상화

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppResult;
use crate::domain::entities::follows::UserFollow;

#[async_trait]
pub trait FollowStore: Send + Sync {
    /// 같은 `(follower, following)` 쌍이 이미 있으면 `ConflictError`.
    /// 동시에 들어온 같은 요청 중 진 쪽도 이 에러를 받는다.
    async fn create(&self, follow: UserFollow) -> AppResult<()>;

    async fn delete_pair(&self, follower_id: &ObjectId, following_id: &ObjectId) -> AppResult<bool>;

    async fn exists(&self, follower_id: &ObjectId, following_id: &ObjectId) -> AppResult<bool>;

    /// 사용자가 양쪽 어디에든 걸린 관계를 모두 지운다.
    async fn delete_for_user(&self, user_id: &ObjectId) -> AppResult<u64>;
}
