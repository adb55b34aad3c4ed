//! 인증 미들웨어
//!
//! 스코프 단위로 `Authorization: Bearer <token>` 헤더를 검증하고,
//! 성공하면 [`AuthenticatedUser`]를 request extensions에 넣습니다.
//!
//! ```rust,ignore
//! web::scope("/admin")
//!     .wrap(AuthMiddleware::required_with_role("admin"))
//!     .service(list_users)
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use async_trait::async_trait;

use crate::core::errors::AppResult;
use crate::domain::models::auth::{AuthenticatedUser, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::AuthService;

/// `Authorization` 헤더 값으로 현재 사용자를 찾는 컴포넌트
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, auth_header: Option<&str>) -> AppResult<AuthenticatedUser>;
}

#[async_trait]
impl IdentityResolver for AuthService {
    async fn resolve(&self, auth_header: Option<&str>) -> AppResult<AuthenticatedUser> {
        self.authenticate(auth_header).await
    }
}

pub struct AuthMiddleware {
    required_role: Option<RequiredRole>,
    resolver: Arc<dyn IdentityResolver>,
}

impl AuthMiddleware {
    pub fn with_resolver(required_role: Option<RequiredRole>, resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { required_role, resolver }
    }

    /// 유효한 토큰이 없으면 401
    pub fn required() -> Self {
        Self::with_resolver(None, AuthService::instance())
    }

    /// 로그인에 더해 `role`까지 필요. 역할이 없으면 403
    pub fn required_with_role(role: &str) -> Self {
        Self::with_resolver(Some(RequiredRole(role.to_string())), AuthService::instance())
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
            resolver: self.resolver.clone(),
        }))
    }
}
