//! `AuthMiddleware`가 만드는 요청 처리 서비스

use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::AppError;
use crate::domain::models::auth::RequiredRole;
use crate::middlewares::auth_middleware::IdentityResolver;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub required_role: Option<RequiredRole>,
    pub resolver: Arc<dyn IdentityResolver>,
}

fn reject<B>(req: ServiceRequest, error: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = error.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required_role = self.required_role.clone();
        let resolver = self.resolver.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            let resolved = resolver.resolve(auth_header.as_deref()).await;

            let user = match resolved {
                Ok(user) => user,
                Err(err) => {
                    log::warn!("인증 실패: {} {}", req.method(), req.path());
                    return Ok(reject(req, err));
                }
            };

            if let Some(required) = required_role.as_ref().filter(|r| !r.is_satisfied(&user.roles)) {
                log::warn!("권한 부족: user_id={} roles={:?} required={:?}", user.user_id, user.roles, required);
                return Ok(reject(
                    req,
                    AppError::AuthorizationError("insufficient permissions".to_string()),
                ));
            }

            log::debug!("인증 성공: user_id={}", user.user_id);
            req.extensions_mut().insert(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
