use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use serde::Deserialize;
use singleton_macro::repository;

use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::comments::Comment;
use crate::repositories::comments::comment_store::CommentStore;

/// 게시글 하나의 댓글 수와 최근 댓글
#[derive(Debug, Clone, Default)]
pub struct CommentStats {
    pub count: u64,
    pub recent: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
struct PostCommentGroup {
    #[serde(rename = "_id")]
    post_id: ObjectId,
    count: i64,
    recent: Vec<Comment>,
}

/// 게시글별로 묶어 댓글 수와 최신 댓글 `recent_limit`개를 한 번에 구합니다.
fn comment_stats_pipeline(post_ids: &[ObjectId], recent_limit: i64) -> Vec<Document> {
    vec![
        doc! { "$match": { "post_id": { "$in": post_ids.to_vec() } } },
        doc! { "$sort": { "created_at": -1 } },
        doc! { "$group": {
            "_id": "$post_id",
            "count": { "$sum": 1 },
            "comments": { "$push": "$$ROOT" },
        } },
        doc! { "$project": {
            "count": 1,
            "recent": { "$slice": ["$comments", recent_limit] },
        } },
    ]
}

#[repository(name = "comment", collection = "comments")]
pub struct CommentRepository {
    db: Arc<Database>,
}

impl CommentRepository {
    pub async fn create(&self, mut comment: Comment) -> AppResult<Comment> {
        let result = self.collection::<Comment>().insert_one(&comment).await?;
        comment.id = Some(
            result
                .inserted_id
                .as_object_id()
                .ok_or_else(|| AppError::InternalError("inserted_id is not an ObjectId".to_string()))?,
        );
        Ok(comment)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Comment>> {
        Ok(self.collection::<Comment>().find_one(doc! { "_id": *id }).await?)
    }

    /// 게시글의 댓글 전체, 최신순
    pub async fn find_by_post(&self, post_id: &ObjectId) -> AppResult<Vec<Comment>> {
        let collection = self.collection::<Comment>();
        let comments = collection
            .find(doc! { "post_id": *post_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(comments)
    }

    /// 여러 게시글의 댓글 통계. 댓글이 없는 게시글은 결과에 없습니다.
    pub async fn stats_by_posts(
        &self,
        post_ids: &[ObjectId],
        recent_limit: i64,
    ) -> AppResult<HashMap<ObjectId, CommentStats>> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let collection = self.collection::<Comment>();
        let groups: Vec<PostCommentGroup> = collection
            .aggregate(comment_stats_pipeline(post_ids, recent_limit))
            .await?
            .with_type::<PostCommentGroup>()
            .try_collect()
            .await?;

        Ok(groups
            .into_iter()
            .map(|group| {
                let stats = CommentStats {
                    count: u64::try_from(group.count).unwrap_or_default(),
                    recent: group.recent,
                };
                (group.post_id, stats)
            })
            .collect())
    }

    pub async fn find_all(&self) -> AppResult<Vec<Comment>> {
        let comments = self
            .collection::<Comment>()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(comments)
    }

    pub async fn update_content(&self, id: &ObjectId, content: &str) -> AppResult<Option<Comment>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection::<Comment>()
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": { "content": content, "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await?)
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Comment>().delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let by_post = IndexModel::builder()
            .keys(doc! { "post_id": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("post_created_at".to_string()).build())
            .build();
        let by_user = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().name("user_id".to_string()).build())
            .build();

        self.collection::<Comment>().create_indexes([by_post, by_user]).await?;
        Ok(())
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    async fn delete_by_post(&self, post_id: &ObjectId) -> AppResult<u64> {
        let result = self
            .collection::<Comment>()
            .delete_many(doc! { "post_id": *post_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn delete_for_user(&self, user_id: &ObjectId, post_ids: &[ObjectId]) -> AppResult<u64> {
        let result = self
            .collection::<Comment>()
            .delete_many(doc! {
                "$or": [
                    { "user_id": *user_id },
                    { "post_id": { "$in": post_ids.to_vec() } },
                ]
            })
            .await?;
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_pipeline_sorts_before_grouping_and_slices_recent() {
        let ids = [ObjectId::new(), ObjectId::new()];
        let pipeline = comment_stats_pipeline(&ids, 3);

        let stages: Vec<&str> = pipeline
            .iter()
            .filter_map(|stage| stage.keys().next())
            .map(String::as_str)
            .collect();
        assert_eq!(stages, ["$match", "$sort", "$group", "$project"]);

        let matched = pipeline[0].get_document("$match").unwrap().get_document("post_id").unwrap();
        assert_eq!(matched.get_array("$in").unwrap().len(), 2);

        let slice = pipeline[3]
            .get_document("$project")
            .unwrap()
            .get_document("recent")
            .unwrap()
            .get_array("$slice")
            .unwrap();
        assert_eq!(slice[1].as_i64(), Some(3));
    }

    #[test]
    fn group_document_deserializes_into_stats() {
        let post_id = ObjectId::new();
        let comment = Comment::new(post_id, ObjectId::new(), "gg".into());
        let group = doc! {
            "_id": post_id,
            "count": 5_i32,
            "recent": [mongodb::bson::to_document(&comment).unwrap()],
        };

        let parsed: PostCommentGroup = mongodb::bson::from_document(group).unwrap();
        assert_eq!(parsed.post_id, post_id);
        assert_eq!(parsed.count, 5);
        assert_eq!(parsed.recent[0].content, "gg");
    }
}
