use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::posts::Post;
use crate::domain::models::game::GameType;
use crate::repositories::posts::post_store::PostStore;

#[repository(name = "post", collection = "posts")]
pub struct PostRepository {
    db: Arc<Database>,
}

impl PostRepository {
    pub async fn create(&self, mut post: Post) -> AppResult<Post> {
        let result = self.collection::<Post>().insert_one(&post).await?;
        post.id = Some(
            result
                .inserted_id
                .as_object_id()
                .ok_or_else(|| AppError::InternalError("inserted_id is not an ObjectId".to_string()))?,
        );
        Ok(post)
    }

    /// 최신순 조회 공통
    async fn find_newest_first(&self, filter: Document) -> AppResult<Vec<Post>> {
        let posts = self
            .collection::<Post>()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(posts)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Post>> {
        self.find_newest_first(doc! {}).await
    }

    pub async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Post>> {
        self.find_newest_first(doc! { "user_id": *user_id }).await
    }

    pub async fn find_by_users(&self, user_ids: &[ObjectId]) -> AppResult<Vec<Post>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_newest_first(doc! { "user_id": { "$in": user_ids.to_vec() } }).await
    }

    pub async fn find_by_game_type(&self, game_type: GameType) -> AppResult<Vec<Post>> {
        self.find_newest_first(doc! { "game_type": game_type.as_str() }).await
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let by_user = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("user_created_at".to_string()).build())
            .build();
        let by_game = IndexModel::builder()
            .keys(doc! { "game_type": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("game_created_at".to_string()).build())
            .build();

        self.collection::<Post>().create_indexes([by_user, by_game]).await?;
        Ok(())
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Post>> {
        Ok(self.collection::<Post>().find_one(doc! { "_id": *id }).await?)
    }

    async fn update_content(
        &self,
        id: &ObjectId,
        content: &str,
        image_url: Option<&str>,
    ) -> AppResult<Option<Post>> {
        let mut fields = doc! { "content": content, "updated_at": DateTime::now() };
        if let Some(image_url) = image_url {
            fields.insert("image_url", image_url);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection::<Post>()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": fields })
            .with_options(options)
            .await?)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Post>().delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }

    /// 계정 삭제 시 댓글 정리용
    async fn find_ids_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        Ok(self
            .find_by_user(user_id)
            .await?
            .into_iter()
            .filter_map(|post| post.id)
            .collect())
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<Post>().delete_many(doc! { "user_id": *user_id }).await?;
        Ok(result.deleted_count)
    }
}
