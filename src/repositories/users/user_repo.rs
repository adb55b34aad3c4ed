//! 사용자 리포지토리 (MongoDB `users` + Redis read-through 캐시)
//!
//! 캐시 키는 `user_repository:<id>`와 `user_repository:email:<email>` 두 가지이며,
//! 사용자 문서를 바꾸는 모든 메서드는 변경 후 두 키를 함께 지웁니다.
//! 캐시 장애는 경고 로그만 남기고 DB 결과로 계속 진행합니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::caching::redis::RedisClient;
use crate::config::RedisConfig;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::Repository;
use crate::db::{is_duplicate_key_error, Database};
use crate::domain::entities::users::User;
use crate::domain::models::oauth::OAuthIdentity;
use crate::repositories::users::user_store::UserStore;

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl UserRepository {
    fn email_cache_key(&self, email: &str) -> String {
        self.cache_key(&format!("email:{}", email))
    }

    async fn cached(&self, key: &str) -> Option<User> {
        match self.redis.get::<User>(key).await {
            Ok(user) => user,
            Err(e) => {
                log::warn!("사용자 캐시 조회 실패 ({}): {}", key, e);
                None
            }
        }
    }

    async fn remember(&self, user: &User) {
        let ttl = RedisConfig::user_ttl_seconds();
        for key in [self.cache_key(&user.id_string()), self.email_cache_key(&user.email)] {
            if let Err(e) = self.redis.set_with_expiry(&key, user, ttl).await {
                log::warn!("사용자 캐시 저장 실패 ({}): {}", key, e);
            }
        }
    }

    async fn forget(&self, user: &User) {
        let keys = [self.cache_key(&user.id_string()), self.email_cache_key(&user.email)];
        if let Err(e) = self.redis.del_multiple(&keys).await {
            log::warn!("사용자 캐시 무효화 실패 ({}): {}", user.id_string(), e);
        }
    }

    /// `_id`로 찾아 `$set` 적용 후 갱신된 문서를 돌려줍니다.
    async fn update_by_id(&self, id: &ObjectId, mut fields: Document) -> AppResult<Option<User>> {
        fields.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection::<User>()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": fields })
            .with_options(options)
            .await?;

        if let Some(ref user) = updated {
            self.forget(user).await;
        }
        Ok(updated)
    }

    pub async fn update_avatar(&self, id: &ObjectId, avatar_url: &str) -> AppResult<Option<User>> {
        self.update_by_id(id, doc! { "avatar": avatar_url }).await
    }

    pub async fn update_name(&self, id: &ObjectId, name: &str) -> AppResult<Option<User>> {
        self.update_by_id(id, doc! { "name": name }).await
    }

    /// 여러 사용자를 한 번에 조회합니다 (게시글/댓글 작성자 조립용).
    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = self
            .collection::<User>()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(users)
    }

    /// 가입일 최신순 전체 목록 (관리자용)
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = self
            .collection::<User>()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(users)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).name("email_unique".to_string()).build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder().name("created_at_desc".to_string()).build())
            .build();

        self.collection::<User>()
            .create_indexes([email_index, created_at_index])
            .await?;
        Ok(())
    }
}

/// 외부 신원 연결용 업데이트 파이프라인.
///
/// 사용자 입력 문자열은 `$literal`로 감싸 필드 경로(`$...`)로 해석되지 않게 한다.
fn link_identity_pipeline(identity: &OAuthIdentity) -> Vec<Document> {
    let mut set = doc! {
        "name": { "$literal": identity.display_name() },
        "provider": identity.provider.as_str(),
        "provider_id": { "$literal": identity.subject.as_str() },
        "updated_at": DateTime::now(),
    };

    if let Some(picture) = identity.picture.as_deref() {
        set.insert(
            "avatar",
            doc! {
                "$cond": [
                    { "$gt": [ { "$strLenCP": { "$ifNull": ["$avatar", ""] } }, 0 ] },
                    "$avatar",
                    { "$literal": picture },
                ]
            },
        );
    }

    vec![doc! { "$set": set }]
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        if let Some(user) = self.cached(&self.email_cache_key(email)).await {
            return Ok(Some(user));
        }

        let user = self.collection::<User>().find_one(doc! { "email": email }).await?;
        if let Some(ref user) = user {
            self.remember(user).await;
        }
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        if let Some(user) = self.cached(&self.cache_key(id)).await {
            return Ok(Some(user));
        }

        let user = self.collection::<User>().find_one(doc! { "_id": object_id }).await?;
        if let Some(ref user) = user {
            self.remember(user).await;
        }
        Ok(user)
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let result = self
            .collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("email already registered".to_string())
                } else {
                    AppError::from(e)
                }
            })?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::InternalError("inserted_id is not an ObjectId".to_string()))?;
        user.id = Some(id);
        Ok(user)
    }

    async fn link_identity(&self, email: &str, identity: &OAuthIdentity) -> AppResult<Option<User>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let linked = self
            .collection::<User>()
            .find_one_and_update(doc! { "email": email }, link_identity_pipeline(identity))
            .with_options(options)
            .await?;

        if let Some(ref user) = linked {
            self.forget(user).await;
        }
        Ok(linked)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let deleted = self
            .collection::<User>()
            .find_one_and_delete(doc! { "_id": *id })
            .await?;

        if let Some(ref user) = deleted {
            self.forget(user).await;
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;

    fn identity(name: &str, picture: Option<&str>) -> OAuthIdentity {
        OAuthIdentity {
            provider: AuthProvider::Google,
            subject: "1098".into(),
            email: "a@x.com".into(),
            name: Some(name.into()),
            picture: picture.map(str::to_string),
        }
    }

    #[test]
    fn link_pipeline_escapes_user_controlled_values() {
        let pipeline = link_identity_pipeline(&identity("$where", None));
        let set = pipeline[0].get_document("$set").unwrap();

        assert_eq!(set.get_document("name").unwrap().get_str("$literal").unwrap(), "$where");
        assert_eq!(set.get_str("provider").unwrap(), "google");
        assert!(!set.contains_key("avatar"));
    }

    #[test]
    fn link_pipeline_fills_avatar_only_when_picture_present() {
        let pipeline = link_identity_pipeline(&identity("A", Some("https://pic")));
        let set = pipeline[0].get_document("$set").unwrap();

        assert!(set.get_document("avatar").unwrap().contains_key("$cond"));
    }
}
