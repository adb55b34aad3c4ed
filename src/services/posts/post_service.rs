//! # 게시글 서비스
//!
//! 게시글 CRUD와 응답 조립을 담당합니다. 엔티티끼리는 id로만 참조하므로,
//! 응답을 만들 때 작성자/랭킹/댓글 통계를 한 번에 모아 조회한 뒤 평평한 DTO로 조립합니다.
//!
//! 수정/삭제 규칙(작성자 확인, 댓글 동반 삭제)은 저장소 트레이트에만 의존하는 [`PostFlow`]에 있습니다.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use validator::Validate;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::comments::CommentResponse;
use crate::domain::dto::posts::{
    CreatePostRequest, PostParts, PostResponse, UpdatePostRequest, RECENT_COMMENT_LIMIT,
};
use crate::domain::entities::posts::Post;
use crate::domain::entities::rankings::GameRanking;
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::game::GameType;
use crate::repositories::comments::{CommentRepository, CommentStats, CommentStore};
use crate::repositories::follows::UserFollowRepository;
use crate::repositories::parse_object_id;
use crate::repositories::posts::{PostRepository, PostStore};
use crate::repositories::rankings::GameRankingRepository;
use crate::repositories::users::UserRepository;

/// 게시글에 붙일 랭킹은 존재해야 하고 같은 게임이어야 합니다.
fn check_ranking(ranking: Option<&GameRanking>, game_type: GameType) -> AppResult<()> {
    match ranking {
        None => Err(AppError::ValidationError("ranking not found".to_string())),
        Some(ranking) if ranking.game_type != game_type => Err(AppError::ValidationError(format!(
            "ranking belongs to {}, not {}",
            ranking.game_type, game_type
        ))),
        Some(_) => Ok(()),
    }
}

fn by_id<T>(items: Vec<T>, id: impl Fn(&T) -> Option<ObjectId>) -> HashMap<ObjectId, T> {
    items
        .into_iter()
        .filter_map(|item| id(&item).map(|key| (key, item)))
        .collect()
}

/// 저장소 구현과 무관한 게시글 수정/삭제 흐름
pub struct PostFlow<'a, P: PostStore + ?Sized, C: CommentStore + ?Sized> {
    posts: &'a P,
    comments: &'a C,
}

impl<'a, P: PostStore + ?Sized, C: CommentStore + ?Sized> PostFlow<'a, P, C> {
    pub fn new(posts: &'a P, comments: &'a C) -> Self {
        Self { posts, comments }
    }

    pub async fn load(&self, post_id: &str) -> AppResult<Post> {
        self.posts
            .find_by_id(&parse_object_id(post_id)?)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))
    }

    /// 작성자 본인만 수정/삭제할 수 있습니다.
    async fn load_owned(&self, current: &AuthenticatedUser, post_id: &str) -> AppResult<Post> {
        let post = self.load(post_id).await?;
        if !post.is_owned_by(&current.object_id()?) {
            log::warn!("게시글 권한 없음: post_id={} user_id={}", post_id, current.user_id);
            return Err(AppError::AuthorizationError("not the author of this post".to_string()));
        }
        Ok(post)
    }

    pub async fn update(
        &self,
        current: &AuthenticatedUser,
        post_id: &str,
        request: &UpdatePostRequest,
    ) -> AppResult<Post> {
        request.validate()?;
        let post = self.load_owned(current, post_id).await?;
        let id = post.id.ok_or_else(|| AppError::InternalError("stored post without id".to_string()))?;

        self.posts
            .update_content(&id, request.content.trim(), request.image_url.as_deref())
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))
    }

    pub async fn delete(&self, current: &AuthenticatedUser, post_id: &str) -> AppResult<()> {
        let post = self.load_owned(current, post_id).await?;
        self.remove(post).await
    }

    /// 관리자 삭제 (작성자 확인 없음)
    pub async fn delete_as_admin(&self, admin: &AuthenticatedUser, post_id: &str) -> AppResult<()> {
        let post = self.load(post_id).await?;
        log::info!("관리자 게시글 삭제: post_id={} by={}", post_id, admin.user_id);
        self.remove(post).await
    }

    /// 댓글을 먼저 지우고 게시글을 지웁니다.
    async fn remove(&self, post: Post) -> AppResult<()> {
        let id = post.id.ok_or_else(|| AppError::InternalError("stored post without id".to_string()))?;

        let comments = self.comments.delete_by_post(&id).await?;
        if !self.posts.delete(&id).await? {
            return Err(AppError::NotFound("post not found".to_string()));
        }

        log::info!("게시글 삭제: post_id={} (comments={})", id.to_hex(), comments);
        Ok(())
    }
}

#[service(name = "post")]
pub struct PostService {
    post_repo: Arc<PostRepository>,
    comment_repo: Arc<CommentRepository>,
    user_repo: Arc<UserRepository>,
    ranking_repo: Arc<GameRankingRepository>,
    follow_repo: Arc<UserFollowRepository>,
}

impl PostService {
    fn flow(&self) -> PostFlow<'_, PostRepository, CommentRepository> {
        PostFlow::new(self.post_repo.as_ref(), self.comment_repo.as_ref())
    }

    /// 게시글 목록을 응답 DTO로 조립합니다. 입력 순서를 유지합니다.
    async fn assemble(&self, posts: Vec<Post>) -> AppResult<Vec<PostResponse>> {
        let post_ids: Vec<ObjectId> = posts.iter().filter_map(|post| post.id).collect();
        let mut stats = self
            .comment_repo
            .stats_by_posts(&post_ids, RECENT_COMMENT_LIMIT)
            .await?;

        let user_ids: HashSet<ObjectId> = posts
            .iter()
            .map(|post| post.user_id)
            .chain(stats.values().flat_map(|s| s.recent.iter().map(|c| c.user_id)))
            .collect();
        let ranking_ids: HashSet<ObjectId> = posts.iter().filter_map(|post| post.ranking_id).collect();

        let users = by_id(
            self.user_repo.find_by_ids(&user_ids.into_iter().collect::<Vec<_>>()).await?,
            |user: &User| user.id,
        );
        let rankings = by_id(
            self.ranking_repo.find_by_ids(&ranking_ids.into_iter().collect::<Vec<_>>()).await?,
            |ranking: &GameRanking| ranking.id,
        );

        Ok(posts
            .iter()
            .map(|post| {
                let CommentStats { count, recent } = post
                    .id
                    .and_then(|id| stats.remove(&id))
                    .unwrap_or_default();
                let recent_comments = recent
                    .iter()
                    .map(|comment| CommentResponse::from_parts(comment, users.get(&comment.user_id)))
                    .collect();

                PostResponse::assemble(
                    post,
                    PostParts {
                        author: users.get(&post.user_id),
                        ranking: post.ranking_id.as_ref().and_then(|id| rankings.get(id)),
                        comment_count: count,
                        recent_comments,
                    },
                )
            })
            .collect())
    }

    async fn assemble_one(&self, post: Post) -> AppResult<PostResponse> {
        self.assemble(vec![post])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("post assembly produced no result".to_string()))
    }

    pub async fn create(&self, current: &AuthenticatedUser, request: CreatePostRequest) -> AppResult<PostResponse> {
        request.validate()?;

        let game_type = request.game_type.unwrap_or_default();
        let ranking_id = match request.ranking_id.as_deref() {
            Some(raw) => {
                let id = parse_object_id(raw)?;
                let ranking = self.ranking_repo.find_by_id(&id).await?;
                check_ranking(ranking.as_ref(), game_type)?;
                Some(id)
            }
            None => None,
        };

        let post = self
            .post_repo
            .create(Post::new(
                current.object_id()?,
                request.content.trim().to_string(),
                request.image_url,
                game_type,
                ranking_id,
            ))
            .await?;

        log::info!("게시글 작성: post_id={:?} user_id={}", post.id, current.user_id);
        self.assemble_one(post).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<PostResponse>> {
        let posts = self.post_repo.find_all().await?;
        self.assemble(posts).await
    }

    pub async fn list_mine(&self, current: &AuthenticatedUser) -> AppResult<Vec<PostResponse>> {
        let posts = self.post_repo.find_by_user(&current.object_id()?).await?;
        self.assemble(posts).await
    }

    /// 내가 팔로우하는 사용자들의 게시글
    pub async fn list_following(&self, current: &AuthenticatedUser) -> AppResult<Vec<PostResponse>> {
        let following = self.follow_repo.following_ids(&current.object_id()?).await?;
        let posts = self.post_repo.find_by_users(&following).await?;
        self.assemble(posts).await
    }

    pub async fn list_by_game(&self, game_type: &str) -> AppResult<Vec<PostResponse>> {
        let game_type: GameType = game_type.parse()?;
        let posts = self.post_repo.find_by_game_type(game_type).await?;
        self.assemble(posts).await
    }

    pub async fn get(&self, post_id: &str) -> AppResult<PostResponse> {
        let post = self.flow().load(post_id).await?;
        self.assemble_one(post).await
    }

    pub async fn update(
        &self,
        current: &AuthenticatedUser,
        post_id: &str,
        request: UpdatePostRequest,
    ) -> AppResult<PostResponse> {
        let updated = self.flow().update(current, post_id, &request).await?;
        self.assemble_one(updated).await
    }

    pub async fn delete(&self, current: &AuthenticatedUser, post_id: &str) -> AppResult<()> {
        self.flow().delete(current, post_id).await
    }

    pub async fn delete_as_admin(&self, admin: &AuthenticatedUser, post_id: &str) -> AppResult<()> {
        self.flow().delete_as_admin(admin, post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use crate::domain::entities::comments::Comment;
    use crate::domain::models::game::RankingType;
    use crate::repositories::memory_social_store::MemorySocialStore;

    fn ranking(game_type: GameType) -> GameRanking {
        GameRanking {
            id: Some(ObjectId::new()),
            game_type,
            ranking_name: "Diamond 1".into(),
            ranking_score: 2400,
            ranking_type: RankingType::Tier,
        }
    }

    #[test]
    fn ranking_must_exist_and_match_game() {
        assert!(check_ranking(Some(&ranking(GameType::Valorant)), GameType::Valorant).is_ok());

        let missing = check_ranking(None, GameType::Valorant);
        assert!(matches!(missing, Err(AppError::ValidationError(_))));

        let mismatched = check_ranking(Some(&ranking(GameType::LeagueOfLegends)), GameType::Valorant);
        assert!(matches!(mismatched, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn by_id_skips_items_without_id() {
        let with_id = ranking(GameType::General);
        let mut without_id = ranking(GameType::General);
        without_id.id = None;

        let map = by_id(vec![with_id.clone(), without_id], |r: &GameRanking| r.id);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&with_id.id.unwrap()));
    }

    fn actor(id: ObjectId, roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.to_hex(),
            email: "a@x.com".into(),
            name: "A".into(),
            provider: AuthProvider::Local,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn seeded_post(store: &MemorySocialStore, author: ObjectId) -> Post {
        store.add_post(Post::new(author, "first blood".into(), None, GameType::Valorant, None))
    }

    fn edit(content: &str) -> UpdatePostRequest {
        UpdatePostRequest {
            content: content.into(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn author_updates_own_post() {
        let store = MemorySocialStore::new();
        let author = ObjectId::new();
        let post = seeded_post(&store, author);
        let post_id = post.id.unwrap().to_hex();

        let flow = PostFlow::new(&store, &store);
        let updated = flow.update(&actor(author, &["user"]), &post_id, &edit("  ace clutch ")).await.unwrap();

        assert_eq!(updated.content, "ace clutch");
        assert_eq!(store.post(&post.id.unwrap()).unwrap().content, "ace clutch");
    }

    #[tokio::test]
    async fn non_author_cannot_update_or_delete() {
        let store = MemorySocialStore::new();
        let post = seeded_post(&store, ObjectId::new());
        let post_id = post.id.unwrap().to_hex();
        let stranger = actor(ObjectId::new(), &["user"]);

        let flow = PostFlow::new(&store, &store);
        let update = flow.update(&stranger, &post_id, &edit("hijacked")).await.unwrap_err();
        let delete = flow.delete(&stranger, &post_id).await.unwrap_err();

        for err in [update, delete] {
            assert!(matches!(err, AppError::AuthorizationError(_)));
            assert_eq!(actix_web::ResponseError::status_code(&err).as_u16(), 403);
        }
        assert_eq!(store.post(&post.id.unwrap()).unwrap().content, "first blood");
    }

    #[tokio::test]
    async fn admin_role_does_not_bypass_author_check_on_owner_routes() {
        let store = MemorySocialStore::new();
        let post = seeded_post(&store, ObjectId::new());
        let admin = actor(ObjectId::new(), &["user", "admin"]);

        let err = PostFlow::new(&store, &store)
            .delete(&admin, &post.id.unwrap().to_hex())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthorizationError(_)));
        assert_eq!(store.post_count(), 1);
    }

    #[tokio::test]
    async fn deleting_post_removes_its_comments() {
        let store = MemorySocialStore::new();
        let author = ObjectId::new();
        let post = seeded_post(&store, author);
        let other = seeded_post(&store, author);
        let post_id = post.id.unwrap();

        store.add_comment(Comment::new(post_id, ObjectId::new(), "gg".into()));
        store.add_comment(Comment::new(post_id, author, "thx".into()));
        store.add_comment(Comment::new(other.id.unwrap(), ObjectId::new(), "nice".into()));

        PostFlow::new(&store, &store)
            .delete(&actor(author, &["user"]), &post_id.to_hex())
            .await
            .unwrap();

        assert!(store.post(&post_id).is_none());
        assert_eq!(store.comments_on(&post_id), 0);
        assert_eq!(store.comment_count(), 1);
        assert_eq!(store.post_count(), 1);
    }

    #[tokio::test]
    async fn admin_delete_skips_author_check_and_cascades() {
        let store = MemorySocialStore::new();
        let post = seeded_post(&store, ObjectId::new());
        let post_id = post.id.unwrap();
        store.add_comment(Comment::new(post_id, ObjectId::new(), "gg".into()));

        PostFlow::new(&store, &store)
            .delete_as_admin(&actor(ObjectId::new(), &["user", "admin"]), &post_id.to_hex())
            .await
            .unwrap();

        assert_eq!(store.post_count(), 0);
        assert_eq!(store.comment_count(), 0);
    }

    #[tokio::test]
    async fn missing_or_malformed_post_ids() {
        let store = MemorySocialStore::new();
        let flow = PostFlow::new(&store, &store);
        let me = actor(ObjectId::new(), &["user"]);

        let missing = flow.delete(&me, &ObjectId::new().to_hex()).await.unwrap_err();
        assert!(matches!(missing, AppError::NotFound(_)));

        let malformed = flow.load("not-an-id").await.unwrap_err();
        assert!(matches!(malformed, AppError::ValidationError(_)));
    }
}
