//! 팔로우 서비스
//!
//! (follower, following) 쌍은 unique 인덱스로 보호됩니다. 동시에 같은 팔로우 요청이 들어와
//! 인덱스에 막힌 쪽도 "already following"으로 응답합니다.
//!
//! 팔로우/언팔로우 규칙은 [`FollowFlow`]에 있고 [`FollowStore`] / [`UserStore`]에만 의존합니다.

use std::collections::HashMap;
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use singleton_macro::service;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::follows::{FollowersCountResponse, FollowingCountResponse, IsFollowingResponse};
use crate::domain::dto::users::PublicUserResponse;
use crate::domain::entities::follows::UserFollow;
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::follows::{FollowStore, UserFollowRepository};
use crate::repositories::parse_object_id;
use crate::repositories::users::{UserRepository, UserStore};

fn already_following() -> AppError {
    AppError::ValidationError("already following".to_string())
}

/// 팔로우 대상 검증 (자기 자신 금지)
fn follow_pair(current: &AuthenticatedUser, target_id: &str) -> AppResult<(ObjectId, ObjectId)> {
    let target = parse_object_id(target_id)?;
    if current.owns(&target) {
        return Err(AppError::ValidationError("cannot follow yourself".to_string()));
    }
    Ok((current.object_id()?, target))
}

/// id 순서를 유지하면서 사용자 요약으로 변환. 사라진 사용자는 건너뜁니다.
fn in_order(ids: &[ObjectId], users: Vec<User>) -> Vec<PublicUserResponse> {
    let by_id: HashMap<ObjectId, User> = users
        .into_iter()
        .filter_map(|user| user.id.map(|id| (id, user)))
        .collect();

    ids.iter()
        .filter_map(|id| by_id.get(id))
        .map(PublicUserResponse::from)
        .collect()
}

/// 저장소 구현과 무관한 팔로우 흐름
pub struct FollowFlow<'a, F: FollowStore + ?Sized, U: UserStore + ?Sized> {
    follows: &'a F,
    users: &'a U,
}

impl<'a, F: FollowStore + ?Sized, U: UserStore + ?Sized> FollowFlow<'a, F, U> {
    pub fn new(follows: &'a F, users: &'a U) -> Self {
        Self { follows, users }
    }

    /// # Errors
    ///
    /// * `AppError::ValidationError` - 자기 자신, 이미 팔로우 중 (동시 요청으로 진 경우 포함)
    /// * `AppError::NotFound` - 대상 사용자 없음
    pub async fn follow(&self, current: &AuthenticatedUser, target_id: &str) -> AppResult<()> {
        let (follower, target) = follow_pair(current, target_id)?;

        if self.users.find_by_id(&target.to_hex()).await?.is_none() {
            return Err(AppError::NotFound("user not found".to_string()));
        }
        if self.follows.exists(&follower, &target).await? {
            return Err(already_following());
        }

        match self.follows.create(UserFollow::new(follower, target)).await {
            Ok(()) => {
                log::info!("팔로우: {} -> {}", follower.to_hex(), target.to_hex());
                Ok(())
            }
            Err(AppError::ConflictError(_)) => Err(already_following()),
            Err(e) => Err(e),
        }
    }

    pub async fn unfollow(&self, current: &AuthenticatedUser, target_id: &str) -> AppResult<()> {
        let (follower, target) = follow_pair(current, target_id)?;

        if !self.follows.delete_pair(&follower, &target).await? {
            return Err(AppError::NotFound("not following this user".to_string()));
        }
        log::info!("언팔로우: {} -> {}", follower.to_hex(), target.to_hex());
        Ok(())
    }
}

#[service(name = "follow")]
pub struct FollowService {
    follow_repo: Arc<UserFollowRepository>,
    user_repo: Arc<UserRepository>,
}

impl FollowService {
    fn flow(&self) -> FollowFlow<'_, UserFollowRepository, UserRepository> {
        FollowFlow::new(self.follow_repo.as_ref(), self.user_repo.as_ref())
    }

    pub async fn follow(&self, current: &AuthenticatedUser, target_id: &str) -> AppResult<()> {
        self.flow().follow(current, target_id).await
    }

    pub async fn unfollow(&self, current: &AuthenticatedUser, target_id: &str) -> AppResult<()> {
        self.flow().unfollow(current, target_id).await
    }

    pub async fn followers_count(&self, user_id: &str) -> AppResult<FollowersCountResponse> {
        let followers = self.follow_repo.count_followers(&parse_object_id(user_id)?).await?;
        Ok(FollowersCountResponse { followers })
    }

    pub async fn following_count(&self, user_id: &str) -> AppResult<FollowingCountResponse> {
        let following = self.follow_repo.count_following(&parse_object_id(user_id)?).await?;
        Ok(FollowingCountResponse { following })
    }

    pub async fn is_following(&self, current: &AuthenticatedUser, target_id: &str) -> AppResult<IsFollowingResponse> {
        let target = parse_object_id(target_id)?;
        let is_following = self.follow_repo.exists(&current.object_id()?, &target).await?;
        Ok(IsFollowingResponse { is_following })
    }

    pub async fn followers(&self, user_id: &str) -> AppResult<Vec<PublicUserResponse>> {
        let ids = self.follow_repo.follower_ids(&parse_object_id(user_id)?).await?;
        let users = self.user_repo.find_by_ids(&ids).await?;
        Ok(in_order(&ids, users))
    }

    pub async fn following(&self, user_id: &str) -> AppResult<Vec<PublicUserResponse>> {
        let ids = self.follow_repo.following_ids(&parse_object_id(user_id)?).await?;
        let users = self.user_repo.find_by_ids(&ids).await?;
        Ok(in_order(&ids, users))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use async_trait::async_trait;

    use crate::config::AuthProvider;
    use crate::repositories::memory_social_store::MemorySocialStore;
    use crate::repositories::users::memory_user_store::MemoryUserStore;

    /// 방금 다른 요청이 같은 관계를 만든 상태: 조회에는 안 보이고 insert는 인덱스에 막힌다.
    struct LostRaceStore;

    #[async_trait]
    impl FollowStore for LostRaceStore {
        async fn create(&self, _follow: UserFollow) -> AppResult<()> {
            Err(AppError::ConflictError("already following".to_string()))
        }

        async fn delete_pair(&self, _follower_id: &ObjectId, _following_id: &ObjectId) -> AppResult<bool> {
            Ok(false)
        }

        async fn exists(&self, _follower_id: &ObjectId, _following_id: &ObjectId) -> AppResult<bool> {
            Ok(false)
        }

        async fn delete_for_user(&self, _user_id: &ObjectId) -> AppResult<u64> {
            Ok(0)
        }
    }

    async fn registered(users: &MemoryUserStore, name: &str) -> ObjectId {
        let stored = users
            .insert(User::new_local(format!("{}@x.com", name), name.into(), "hash".into()))
            .await
            .unwrap();
        stored.id.unwrap()
    }

    fn current(id: ObjectId) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.to_hex(),
            email: "me@x.com".into(),
            name: "Me".into(),
            provider: AuthProvider::Local,
            roles: vec!["user".into()],
        }
    }

    fn user(id: ObjectId, name: &str) -> User {
        let mut user = User::new_local(format!("{}@x.com", name), name.into(), "hash".into());
        user.id = Some(id);
        user
    }

    #[test]
    fn cannot_follow_yourself() {
        let me = ObjectId::new();
        let err = follow_pair(&current(me), &me.to_hex()).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(err.to_string(), "Validation error: cannot follow yourself");

        let other = ObjectId::new();
        assert_eq!(follow_pair(&current(me), &other.to_hex()).unwrap(), (me, other));
        assert!(follow_pair(&current(me), "not-an-id").is_err());
    }

    #[test]
    fn lists_keep_edge_order_and_skip_missing_users() {
        let (a, b, gone) = (ObjectId::new(), ObjectId::new(), ObjectId::new());
        let listed = in_order(&[b, gone, a], vec![user(a, "alpha"), user(b, "bravo")]);

        let names: Vec<&str> = listed.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["bravo", "alpha"]);
    }

    #[tokio::test]
    async fn follow_then_duplicate_is_rejected() {
        let (follows, users) = (MemorySocialStore::new(), MemoryUserStore::new());
        let (me, target) = (registered(&users, "me").await, registered(&users, "target").await);
        let flow = FollowFlow::new(&follows, &users);

        flow.follow(&current(me), &target.to_hex()).await.unwrap();
        let err = flow.follow(&current(me), &target.to_hex()).await.unwrap_err();

        assert_eq!(err.to_string(), "Validation error: already following");
        assert_eq!(err.error_response().status().as_u16(), 400);
        assert_eq!(follows.follow_count(), 1);
    }

    #[tokio::test]
    async fn lost_insert_race_reports_already_following() {
        let users = MemoryUserStore::new();
        let (me, target) = (registered(&users, "me").await, registered(&users, "target").await);

        let err = FollowFlow::new(&LostRaceStore, &users)
            .follow(&current(me), &target.to_hex())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: already following");
        assert_eq!(err.error_response().status().as_u16(), 400);
    }

    #[tokio::test]
    async fn concurrent_follows_create_one_edge() {
        let (follows, users) = (MemorySocialStore::new(), MemoryUserStore::new());
        let (me, target) = (registered(&users, "me").await, registered(&users, "target").await);
        let (first, second) = (FollowFlow::new(&follows, &users), FollowFlow::new(&follows, &users));
        let actor = current(me);
        let target_hex = target.to_hex();

        let (a, b) = tokio::join!(first.follow(&actor, &target_hex), second.follow(&actor, &target_hex));

        assert_eq!(follows.follow_count(), 1);
        let failures: Vec<AppError> = [a, b].into_iter().filter_map(Result::err).collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].to_string(), "Validation error: already following");
    }

    #[tokio::test]
    async fn follow_unknown_user_is_not_found() {
        let (follows, users) = (MemorySocialStore::new(), MemoryUserStore::new());
        let me = registered(&users, "me").await;

        let err = FollowFlow::new(&follows, &users)
            .follow(&current(me), &ObjectId::new().to_hex())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(follows.follow_count(), 0);
    }

    #[tokio::test]
    async fn unfollow_without_edge_is_not_found() {
        let (follows, users) = (MemorySocialStore::new(), MemoryUserStore::new());
        let (me, target) = (registered(&users, "me").await, registered(&users, "target").await);
        let flow = FollowFlow::new(&follows, &users);

        let err = flow.unfollow(&current(me), &target.to_hex()).await.unwrap_err();
        assert_eq!(err.error_response().status().as_u16(), 404);

        flow.follow(&current(me), &target.to_hex()).await.unwrap();
        flow.unfollow(&current(me), &target.to_hex()).await.unwrap();
        assert_eq!(follows.follow_count(), 0);
    }
}
