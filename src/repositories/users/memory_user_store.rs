//! 테스트용 메모리 사용자 저장소
//!
//! MongoDB의 email unique 인덱스와 같은 규칙(중복 insert → `ConflictError`)을 지킵니다.
//! 조회 메서드는 한 번 양보(yield)해서 동시 요청이 실제로 교차 실행되게 합니다.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::User;
use crate::domain::models::oauth::OAuthIdentity;
use crate::repositories::users::user_store::UserStore;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn snapshot(&self, email: &str) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.email == email).cloned()
    }

    pub fn remove(&self, id: &ObjectId) {
        self.users.lock().unwrap().retain(|u| u.id.as_ref() != Some(id));
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        tokio::task::yield_now().await;
        Ok(self.snapshot(email))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        tokio::task::yield_now().await;
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == Some(object_id)).cloned())
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::ConflictError("email already registered".to_string()));
        }
        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn link_identity(&self, email: &str, identity: &OAuthIdentity) -> AppResult<Option<User>> {
        tokio::task::yield_now().await;
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.email == email) else {
            return Ok(None);
        };

        user.name = identity.display_name();
        user.provider = identity.provider;
        user.provider_id = Some(identity.subject.clone());
        if user.avatar.is_empty() {
            if let Some(picture) = &identity.picture {
                user.avatar = picture.clone();
            }
        }
        user.updated_at = DateTime::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let position = users.iter().position(|u| u.id.as_ref() == Some(id));
        Ok(position.map(|index| users.remove(index)))
    }
}
