use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::core::errors::{AppError, AppResult};
use crate::db::{is_duplicate_key_error, Database};
use crate::domain::entities::follows::UserFollow;
use crate::repositories::follows::follow_store::FollowStore;

#[repository(name = "userfollow", collection = "user_follows")]
pub struct UserFollowRepository {
    db: Arc<Database>,
}

impl UserFollowRepository {
    pub async fn count_followers(&self, user_id: &ObjectId) -> AppResult<u64> {
        Ok(self
            .collection::<UserFollow>()
            .count_documents(doc! { "following_id": *user_id })
            .await?)
    }

    pub async fn count_following(&self, user_id: &ObjectId) -> AppResult<u64> {
        Ok(self
            .collection::<UserFollow>()
            .count_documents(doc! { "follower_id": *user_id })
            .await?)
    }

    /// `user_id`를 팔로우하는 사용자들의 id, 최근 팔로우 순
    pub async fn follower_ids(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        let edges: Vec<UserFollow> = self
            .collection::<UserFollow>()
            .find(doc! { "following_id": *user_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(edges.into_iter().map(|edge| edge.follower_id).collect())
    }

    /// `user_id`가 팔로우하는 사용자들의 id, 최근 팔로우 순
    pub async fn following_ids(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        let edges: Vec<UserFollow> = self
            .collection::<UserFollow>()
            .find(doc! { "follower_id": *user_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(edges.into_iter().map(|edge| edge.following_id).collect())
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let unique_pair = IndexModel::builder()
            .keys(doc! { "follower_id": 1, "following_id": 1 })
            .options(IndexOptions::builder().unique(true).name("follower_following_unique".to_string()).build())
            .build();
        let by_following = IndexModel::builder()
            .keys(doc! { "following_id": 1 })
            .options(IndexOptions::builder().name("following_id".to_string()).build())
            .build();

        self.collection::<UserFollow>()
            .create_indexes([unique_pair, by_following])
            .await?;
        Ok(())
    }
}

#[async_trait]
impl FollowStore for UserFollowRepository {
    async fn create(&self, follow: UserFollow) -> AppResult<()> {
        self.collection::<UserFollow>()
            .insert_one(&follow)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("already following".to_string())
                } else {
                    AppError::from(e)
                }
            })?;
        Ok(())
    }

    async fn delete_pair(&self, follower_id: &ObjectId, following_id: &ObjectId) -> AppResult<bool> {
        let result = self
            .collection::<UserFollow>()
            .delete_one(doc! { "follower_id": *follower_id, "following_id": *following_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn exists(&self, follower_id: &ObjectId, following_id: &ObjectId) -> AppResult<bool> {
        let count = self
            .collection::<UserFollow>()
            .count_documents(doc! { "follower_id": *follower_id, "following_id": *following_id })
            .await?;
        Ok(count > 0)
    }

    async fn delete_for_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let result = self
            .collection::<UserFollow>()
            .delete_many(doc! { "$or": [ { "follower_id": *user_id }, { "following_id": *user_id } ] })
            .await?;
        Ok(result.deleted_count)
    }
}
