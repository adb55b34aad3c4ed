//! 게시글 수정/삭제 흐름이 의존하는 저장소 추상화

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppResult;
use crate::domain::entities::posts::Post;

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Post>>;

    /// `image_url`이 `None`이면 기존 이미지를 유지한다. 게시글이 없으면 `None`.
    async fn update_content(&self, id: &ObjectId, content: &str, image_url: Option<&str>)
        -> AppResult<Option<Post>>;

    /// 지운 문서가 있었는지
    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;

    async fn find_ids_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>>;

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64>;
}
