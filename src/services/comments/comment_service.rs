//! 댓글 서비스
//!
//! 댓글 작성은 인증된 사용자만 가능합니다. 수정/삭제는 작성자 본인 또는 관리자.

use std::collections::HashMap;
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use validator::Validate;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::comments::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use crate::domain::entities::comments::Comment;
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::comments::CommentRepository;
use crate::repositories::parse_object_id;
use crate::repositories::posts::{PostRepository, PostStore};
use crate::repositories::users::UserRepository;

fn ensure_can_modify(current: &AuthenticatedUser, comment: &Comment) -> AppResult<()> {
    if current.owns(&comment.user_id) || current.is_admin() {
        return Ok(());
    }
    Err(AppError::AuthorizationError("not the author of this comment".to_string()))
}

#[service(name = "comment")]
pub struct CommentService {
    comment_repo: Arc<CommentRepository>,
    post_repo: Arc<PostRepository>,
    user_repo: Arc<UserRepository>,
}

impl CommentService {
    async fn with_authors(&self, comments: Vec<Comment>) -> AppResult<Vec<CommentResponse>> {
        let mut author_ids: Vec<ObjectId> = comments.iter().map(|c| c.user_id).collect();
        author_ids.sort_by_key(|id| id.to_hex());
        author_ids.dedup();

        let authors: HashMap<ObjectId, User> = self
            .user_repo
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .filter_map(|user| user.id.map(|id| (id, user)))
            .collect();

        Ok(comments
            .iter()
            .map(|comment| CommentResponse::from_parts(comment, authors.get(&comment.user_id)))
            .collect())
    }

    async fn load_modifiable(&self, current: &AuthenticatedUser, comment_id: &str) -> AppResult<Comment> {
        let comment = self
            .comment_repo
            .find_by_id(&parse_object_id(comment_id)?)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

        ensure_can_modify(current, &comment)?;
        Ok(comment)
    }

    pub async fn create(&self, current: &AuthenticatedUser, request: CreateCommentRequest) -> AppResult<CommentResponse> {
        request.validate()?;

        let post_id = parse_object_id(&request.post_id)?;
        if self.post_repo.find_by_id(&post_id).await?.is_none() {
            return Err(AppError::NotFound("post not found".to_string()));
        }

        let comment = self
            .comment_repo
            .create(Comment::new(post_id, current.object_id()?, request.content.trim().to_string()))
            .await?;

        let mut responses = self.with_authors(vec![comment]).await?;
        responses
            .pop()
            .ok_or_else(|| AppError::InternalError("comment assembly produced no result".to_string()))
    }

    /// 게시글의 댓글 전체, 최신순
    pub async fn list_for_post(&self, post_id: &str) -> AppResult<Vec<CommentResponse>> {
        let comments = self.comment_repo.find_by_post(&parse_object_id(post_id)?).await?;
        self.with_authors(comments).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<CommentResponse>> {
        let comments = self.comment_repo.find_all().await?;
        self.with_authors(comments).await
    }

    pub async fn update(
        &self,
        current: &AuthenticatedUser,
        comment_id: &str,
        request: UpdateCommentRequest,
    ) -> AppResult<CommentResponse> {
        request.validate()?;
        let comment = self.load_modifiable(current, comment_id).await?;
        let id = comment
            .id
            .ok_or_else(|| AppError::InternalError("stored comment without id".to_string()))?;

        let updated = self
            .comment_repo
            .update_content(&id, request.content.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

        let mut responses = self.with_authors(vec![updated]).await?;
        responses
            .pop()
            .ok_or_else(|| AppError::InternalError("comment assembly produced no result".to_string()))
    }

    pub async fn delete(&self, current: &AuthenticatedUser, comment_id: &str) -> AppResult<()> {
        let comment = self.load_modifiable(current, comment_id).await?;
        let id = comment
            .id
            .ok_or_else(|| AppError::InternalError("stored comment without id".to_string()))?;

        if !self.comment_repo.delete(&id).await? {
            return Err(AppError::NotFound("comment not found".to_string()));
        }
        log::info!("댓글 삭제: comment_id={} by={}", id.to_hex(), current.user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;

    fn actor(id: ObjectId, roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.to_hex(),
            email: "a@x.com".into(),
            name: "A".into(),
            provider: AuthProvider::Local,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn author_or_admin_may_modify() {
        let author = ObjectId::new();
        let comment = Comment::new(ObjectId::new(), author, "gg".into());

        assert!(ensure_can_modify(&actor(author, &["user"]), &comment).is_ok());
        assert!(ensure_can_modify(&actor(ObjectId::new(), &["user", "admin"]), &comment).is_ok());

        let stranger = ensure_can_modify(&actor(ObjectId::new(), &["user"]), &comment);
        assert!(matches!(stranger, Err(AppError::AuthorizationError(_))));
    }
}
