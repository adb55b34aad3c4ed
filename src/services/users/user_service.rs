//! # 사용자 서비스
//!
//! 프로필 조회/수정, 아바타 변경, 공개 프로필, 관리자용 목록과 계정 삭제를 담당합니다.
//!
//! 계정 삭제는 하드 삭제이며 연관 데이터를 함께 지웁니다.
//!
//! ```text
//! delete_user(id)
//!   ├─ 댓글: 본인이 쓴 댓글 + 본인 게시글에 달린 댓글
//!   ├─ 게시글
//!   ├─ 팔로우 관계 (양방향)
//!   └─ 사용자 문서 (+ 캐시 무효화)
//! ```

use std::sync::Arc;

use singleton_macro::service;
use validator::Validate;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::{
    AdminUserResponse, AvatarUpdatedResponse, PublicUserResponse, UpdateAvatarRequest,
    UpdateProfileRequest, UserProfileResponse,
};
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::comments::{CommentRepository, CommentStore};
use crate::repositories::follows::{FollowStore, UserFollowRepository};
use crate::repositories::parse_object_id;
use crate::repositories::posts::{PostRepository, PostStore};
use crate::repositories::users::{UserRepository, UserStore};

/// 연관 데이터를 포함한 계정 하드 삭제
pub struct AccountRemoval<'a, U, P, C, F>
where
    U: UserStore + ?Sized,
    P: PostStore + ?Sized,
    C: CommentStore + ?Sized,
    F: FollowStore + ?Sized,
{
    users: &'a U,
    posts: &'a P,
    comments: &'a C,
    follows: &'a F,
}

impl<'a, U, P, C, F> AccountRemoval<'a, U, P, C, F>
where
    U: UserStore + ?Sized,
    P: PostStore + ?Sized,
    C: CommentStore + ?Sized,
    F: FollowStore + ?Sized,
{
    pub fn new(users: &'a U, posts: &'a P, comments: &'a C, follows: &'a F) -> Self {
        Self { users, posts, comments, follows }
    }

    /// 관리자 계정 삭제. 자기 자신은 지울 수 없습니다.
    pub async fn delete_user(&self, admin: &AuthenticatedUser, user_id: &str) -> AppResult<()> {
        let id = parse_object_id(user_id)?;
        if admin.owns(&id) {
            return Err(AppError::ValidationError("cannot delete your own account".to_string()));
        }
        if self.users.find_by_id(&id.to_hex()).await?.is_none() {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let post_ids = self.posts.find_ids_by_user(&id).await?;
        let comments = self.comments.delete_for_user(&id, &post_ids).await?;
        let posts = self.posts.delete_by_user(&id).await?;
        let follows = self.follows.delete_for_user(&id).await?;
        self.users.delete(&id).await?;

        log::info!(
            "사용자 삭제: user_id={} by={} (posts={}, comments={}, follows={})",
            id.to_hex(),
            admin.user_id,
            posts,
            comments,
            follows
        );
        Ok(())
    }
}

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    post_repo: Arc<PostRepository>,
    comment_repo: Arc<CommentRepository>,
    follow_repo: Arc<UserFollowRepository>,
}

impl UserService {
    async fn load(&self, id: &str) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))
    }

    pub async fn profile(&self, current: &AuthenticatedUser) -> AppResult<UserProfileResponse> {
        let user = self.load(&current.user_id).await?;
        Ok(UserProfileResponse::from(&user))
    }

    pub async fn update_avatar(
        &self,
        current: &AuthenticatedUser,
        request: UpdateAvatarRequest,
    ) -> AppResult<AvatarUpdatedResponse> {
        request.validate()?;

        let user = self
            .user_repo
            .update_avatar(&current.object_id()?, request.avatar_url.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        log::info!("아바타 변경: user_id={}", user.id_string());
        Ok(AvatarUpdatedResponse {
            message: "avatar updated".to_string(),
            avatar_url: user.avatar,
        })
    }

    pub async fn update_profile(
        &self,
        current: &AuthenticatedUser,
        request: UpdateProfileRequest,
    ) -> AppResult<UserProfileResponse> {
        request.validate()?;

        let user = self
            .user_repo
            .update_name(&current.object_id()?, request.name.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        Ok(UserProfileResponse::from(&user))
    }

    pub async fn public_profile(&self, user_id: &str) -> AppResult<PublicUserResponse> {
        parse_object_id(user_id)?;
        let user = self.load(user_id.trim()).await?;
        Ok(PublicUserResponse::from(&user))
    }

    pub async fn list_users(&self) -> AppResult<Vec<AdminUserResponse>> {
        let users = self.user_repo.find_all().await?;
        Ok(users.iter().map(AdminUserResponse::from).collect())
    }

    pub async fn delete_user(&self, admin: &AuthenticatedUser, user_id: &str) -> AppResult<()> {
        AccountRemoval::new(
            self.user_repo.as_ref(),
            self.post_repo.as_ref(),
            self.comment_repo.as_ref(),
            self.follow_repo.as_ref(),
        )
        .delete_user(admin, user_id)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use crate::domain::entities::comments::Comment;
    use crate::domain::entities::posts::Post;
    use crate::domain::models::game::GameType;
    use crate::repositories::memory_social_store::MemorySocialStore;
    use crate::repositories::users::memory_user_store::MemoryUserStore;
    use mongodb::bson::oid::ObjectId;

    fn admin(id: ObjectId) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.to_hex(),
            email: "admin@x.com".into(),
            name: "Admin".into(),
            provider: AuthProvider::Local,
            roles: vec!["user".into(), "admin".into()],
        }
    }

    async fn registered(users: &MemoryUserStore, name: &str) -> ObjectId {
        users
            .insert(User::new_local(format!("{}@x.com", name), name.into(), "hash".into()))
            .await
            .unwrap()
            .id
            .unwrap()
    }

    fn post_by(social: &MemorySocialStore, author: ObjectId) -> ObjectId {
        social
            .add_post(Post::new(author, "gg".into(), None, GameType::General, None))
            .id
            .unwrap()
    }

    #[tokio::test]
    async fn delete_user_removes_posts_comments_and_follows() {
        let (users, social) = (MemoryUserStore::new(), MemorySocialStore::new());
        let doomed = registered(&users, "doomed").await;
        let bystander = registered(&users, "bystander").await;

        let doomed_post = post_by(&social, doomed);
        let other_post = post_by(&social, bystander);
        // 삭제 대상 게시글에 달린 남의 댓글, 남의 게시글에 단 대상의 댓글, 무관한 댓글
        social.add_comment(Comment::new(doomed_post, bystander, "on doomed post".into()));
        social.add_comment(Comment::new(other_post, doomed, "by doomed".into()));
        social.add_comment(Comment::new(other_post, bystander, "survives".into()));
        social.add_follow(doomed, bystander);
        social.add_follow(bystander, doomed);

        AccountRemoval::new(&users, &social, &social, &social)
            .delete_user(&admin(ObjectId::new()), &doomed.to_hex())
            .await
            .unwrap();

        assert!(users.find_by_id(&doomed.to_hex()).await.unwrap().is_none());
        assert_eq!(users.len(), 1);
        assert_eq!(social.post_count(), 1);
        assert!(social.post(&other_post).is_some());
        assert_eq!(social.comment_count(), 1);
        assert_eq!(social.comments_on(&other_post), 1);
        assert_eq!(social.follow_count(), 0);
    }

    #[tokio::test]
    async fn admin_cannot_delete_self() {
        let (users, social) = (MemoryUserStore::new(), MemorySocialStore::new());
        let me = registered(&users, "admin").await;

        let err = AccountRemoval::new(&users, &social, &social, &social)
            .delete_user(&admin(me), &me.to_hex())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn deleting_unknown_user_is_not_found() {
        let (users, social) = (MemoryUserStore::new(), MemorySocialStore::new());

        let err = AccountRemoval::new(&users, &social, &social, &social)
            .delete_user(&admin(ObjectId::new()), &ObjectId::new().to_hex())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
