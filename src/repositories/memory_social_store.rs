//! 테스트용 메모리 저장소 (게시글, 댓글, 팔로우)
//!
//! 팔로우 쌍은 MongoDB의 unique 인덱스처럼 중복 insert에 `ConflictError`를 돌려줍니다.
//! `exists`는 먼저 결과를 읽고 나서 양보하므로, 동시 요청 둘이 모두 "없음"을 보고
//! insert 단계에서 경합하는 상황이 재현됩니다.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::comments::Comment;
use crate::domain::entities::follows::UserFollow;
use crate::domain::entities::posts::Post;
use crate::repositories::comments::CommentStore;
use crate::repositories::follows::FollowStore;
use crate::repositories::posts::PostStore;

#[derive(Default)]
pub struct MemorySocialStore {
    posts: Mutex<Vec<Post>>,
    comments: Mutex<Vec<Comment>>,
    follows: Mutex<Vec<UserFollow>>,
}

impl MemorySocialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_post(&self, mut post: Post) -> Post {
        post.id = Some(ObjectId::new());
        self.posts.lock().unwrap().push(post.clone());
        post
    }

    pub fn add_comment(&self, mut comment: Comment) -> Comment {
        comment.id = Some(ObjectId::new());
        self.comments.lock().unwrap().push(comment.clone());
        comment
    }

    pub fn add_follow(&self, follower_id: ObjectId, following_id: ObjectId) {
        self.follows.lock().unwrap().push(UserFollow::new(follower_id, following_id));
    }

    pub fn post(&self, id: &ObjectId) -> Option<Post> {
        self.posts.lock().unwrap().iter().find(|p| p.id.as_ref() == Some(id)).cloned()
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.lock().unwrap().len()
    }

    pub fn follow_count(&self) -> usize {
        self.follows.lock().unwrap().len()
    }

    pub fn comments_on(&self, post_id: &ObjectId) -> usize {
        self.comments.lock().unwrap().iter().filter(|c| &c.post_id == post_id).count()
    }
}

#[async_trait]
impl PostStore for MemorySocialStore {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Post>> {
        tokio::task::yield_now().await;
        Ok(self.post(id))
    }

    async fn update_content(&self, id: &ObjectId, content: &str, image_url: Option<&str>) -> AppResult<Option<Post>> {
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|p| p.id.as_ref() == Some(id)) else {
            return Ok(None);
        };

        post.content = content.to_string();
        if let Some(image_url) = image_url {
            post.image_url = Some(image_url.to_string());
        }
        post.updated_at = DateTime::now();
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id.as_ref() != Some(id));
        Ok(posts.len() < before)
    }

    async fn find_ids_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| &p.user_id == user_id)
            .filter_map(|p| p.id)
            .collect())
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| &p.user_id != user_id);
        Ok((before - posts.len()) as u64)
    }
}

#[async_trait]
impl CommentStore for MemorySocialStore {
    async fn delete_by_post(&self, post_id: &ObjectId) -> AppResult<u64> {
        let mut comments = self.comments.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| &c.post_id != post_id);
        Ok((before - comments.len()) as u64)
    }

    async fn delete_for_user(&self, user_id: &ObjectId, post_ids: &[ObjectId]) -> AppResult<u64> {
        let mut comments = self.comments.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| &c.user_id != user_id && !post_ids.contains(&c.post_id));
        Ok((before - comments.len()) as u64)
    }
}

#[async_trait]
impl FollowStore for MemorySocialStore {
    async fn create(&self, mut follow: UserFollow) -> AppResult<()> {
        let mut follows = self.follows.lock().unwrap();
        let duplicate = follows
            .iter()
            .any(|f| f.follower_id == follow.follower_id && f.following_id == follow.following_id);
        if duplicate {
            return Err(AppError::ConflictError("already following".to_string()));
        }
        follow.id = Some(ObjectId::new());
        follows.push(follow);
        Ok(())
    }

    async fn delete_pair(&self, follower_id: &ObjectId, following_id: &ObjectId) -> AppResult<bool> {
        let mut follows = self.follows.lock().unwrap();
        let before = follows.len();
        follows.retain(|f| !(&f.follower_id == follower_id && &f.following_id == following_id));
        Ok(follows.len() < before)
    }

    async fn exists(&self, follower_id: &ObjectId, following_id: &ObjectId) -> AppResult<bool> {
        let found = self
            .follows
            .lock()
            .unwrap()
            .iter()
            .any(|f| &f.follower_id == follower_id && &f.following_id == following_id);
        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn delete_for_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let mut follows = self.follows.lock().unwrap();
        let before = follows.len();
        follows.retain(|f| &f.follower_id != user_id && &f.following_id != user_id);
        Ok((before - follows.len()) as u64)
    }
}
