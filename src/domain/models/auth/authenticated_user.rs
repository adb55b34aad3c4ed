//! 요청 단위 인증 주체
//!
//! `AuthMiddleware`가 토큰을 검증하고 사용자를 조회한 뒤 request extensions에 넣어 두면,
//! 핸들러는 `AuthenticatedUser` 인자로 꺼내 씁니다.
//!
//! ```rust,ignore
//! #[get("/profile")]
//! async fn profile(user: AuthenticatedUser) -> Result<HttpResponse, AppError> { ... }
//! ```

use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::core::errors::AppError;
use crate::domain::entities::users::{User, ROLE_ADMIN};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub provider: AuthProvider,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// 리소스 작성자 본인인지
    pub fn owns(&self, owner_id: &ObjectId) -> bool {
        self.user_id == owner_id.to_hex()
    }

    pub fn object_id(&self) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(&self.user_id).map_err(|_| AppError::invalid_token())
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            provider: user.provider,
            roles: user.roles.clone(),
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(user.ok_or_else(|| AppError::AuthenticationError("authentication required".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn sample() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: ObjectId::new().to_hex(),
            email: "a@x.com".into(),
            name: "A".into(),
            provider: AuthProvider::Local,
            roles: vec!["user".into(), "admin".into()],
        }
    }

    #[test]
    fn role_checks() {
        let user = sample();
        assert!(user.has_role("admin"));
        assert!(!user.has_role("moderator"));
        assert!(user.is_admin());
        assert!(user.object_id().is_ok());
        assert!(user.owns(&user.object_id().unwrap()));
        assert!(!user.owns(&ObjectId::new()));
    }

    #[actix_web::test]
    async fn extractor_reads_request_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(sample());

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user.email, "a@x.com");
    }

    #[actix_web::test]
    async fn extractor_rejects_anonymous_request() {
        let req = TestRequest::default().to_http_request();

        assert!(matches!(
            AuthenticatedUser::extract(&req).await,
            Err(AppError::AuthenticationError(_))
        ));
    }
}
