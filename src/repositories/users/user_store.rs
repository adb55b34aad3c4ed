//! 인증 코어가 의존하는 사용자 저장소 추상화
//!
//! 운영에서는 [`UserRepository`](super::UserRepository)(MongoDB + Redis)가,
//! 테스트에서는 메모리 구현이 이 트레이트를 구현합니다.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppResult;
use crate::domain::entities::users::User;
use crate::domain::models::oauth::OAuthIdentity;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// `email`은 정규화된 값이어야 한다.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// 형식이 맞지 않는 id는 존재하지 않는 사용자로 취급한다.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// 새 사용자를 저장하고 id가 채워진 레코드를 돌려준다.
    ///
    /// 같은 이메일이 이미 있으면 `ConflictError`. 동시 가입 경쟁도 이 에러로 드러난다.
    async fn insert(&self, user: User) -> AppResult<User>;

    /// 이메일이 일치하는 계정에 외부 신원을 원자적으로 연결한다.
    ///
    /// 이름/프로바이더/프로바이더 ID를 덮어쓰고, 아바타는 비어 있을 때만 사진으로 채운다.
    /// 여러 번 호출해도 결과가 같다. 계정이 없으면 `None`.
    async fn link_identity(&self, email: &str, identity: &OAuthIdentity) -> AppResult<Option<User>>;

    /// 삭제된 레코드를 돌려준다. 없으면 `None`.
    async fn delete(&self, id: &ObjectId) -> AppResult<Option<User>>;
}
