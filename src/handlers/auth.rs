//! 인증 HTTP 핸들러
//!
//! - `POST /api/auth/signup` - 로컬 회원가입
//! - `POST /api/auth/login` - 이메일/비밀번호 로그인
//! - `POST /api/auth/oauth`, `POST /api/auth/google` - Google ID 토큰 로그인
//! - `GET /api/auth/me` - 토큰의 현재 사용자

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::users::{LoginRequest, OAuthLoginRequest, SignupRequest};
use crate::services::auth::AuthService;
use crate::services::users::UserService;

#[post("/signup")]
pub async fn signup(payload: web::Json<SignupRequest>) -> Result<HttpResponse, AppError> {
    let response = AuthService::instance().signup(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/login")]
pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    let response = AuthService::instance().login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

async fn oauth_login(payload: web::Json<OAuthLoginRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = AuthService::instance().google_login(&payload.credential).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/oauth")]
pub async fn oauth(payload: web::Json<OAuthLoginRequest>) -> Result<HttpResponse, AppError> {
    oauth_login(payload).await
}

/// 프론트엔드 호환 경로
#[post("/google")]
pub async fn google(payload: web::Json<OAuthLoginRequest>) -> Result<HttpResponse, AppError> {
    oauth_login(payload).await
}

/// identity resolver를 그대로 노출합니다. 미들웨어 없이 헤더를 직접 검증합니다.
#[get("/me")]
pub async fn me(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    let current = AuthService::instance().authenticate(auth_header).await?;
    let profile = UserService::instance().profile(&current).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};

    use super::*;
    use crate::config::AuthSettings;
    use crate::domain::dto::users::AuthResponse;
    use crate::repositories::users::memory_user_store::MemoryUserStore;
    use crate::routes::json_config;
    use crate::services::auth::{AuthFlow, PasswordService, TokenService};

    /// 메모리 저장소로 같은 회원가입 흐름을 돌리는 백엔드
    struct MemoryBackend {
        store: MemoryUserStore,
        passwords: PasswordService,
        tokens: TokenService,
    }

    impl MemoryBackend {
        fn new() -> Self {
            let settings = Arc::new(AuthSettings::for_tests());
            Self {
                store: MemoryUserStore::new(),
                passwords: PasswordService::with_settings(settings.clone()),
                tokens: TokenService::with_settings(settings),
            }
        }
    }

    async fn memory_signup(
        backend: web::Data<MemoryBackend>,
        payload: web::Json<SignupRequest>,
    ) -> Result<HttpResponse, AppError> {
        let session = AuthFlow::new(&backend.store, &backend.passwords, &backend.tokens)
            .signup(payload.into_inner())
            .await?;
        Ok(HttpResponse::Ok().json(AuthResponse::new(session.token, &session.user)))
    }

    #[actix_web::test]
    async fn signup_returns_token_then_conflict() {
        let backend = web::Data::new(MemoryBackend::new());
        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .app_data(backend.clone())
                .route("/api/auth/signup", web::post().to(memory_signup)),
        )
        .await;

        let body = serde_json::json!({"email": "Gamer@Example.com", "password": "secret1", "name": "Gamer"});

        let req = test::TestRequest::post().uri("/api/auth/signup").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let created: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(created["email"], "gamer@example.com");
        assert_eq!(created["name"], "Gamer");
        let token = created["token"].as_str().unwrap();
        assert!(backend.tokens.validate(token).is_ok());

        let req = test::TestRequest::post().uri("/api/auth/signup").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let conflict: serde_json::Value = test::read_body_json(resp).await;
        assert!(conflict["error"].as_str().unwrap().contains("email already registered"));
        assert_eq!(backend.store.len(), 1);
    }

    #[actix_web::test]
    async fn signup_rejects_overlong_password_with_400() {
        let backend = web::Data::new(MemoryBackend::new());
        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .app_data(backend.clone())
                .route("/api/auth/signup", web::post().to(memory_signup)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(serde_json::json!({"email": "a@x.com", "password": "a".repeat(80), "name": "A"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(backend.store.len(), 0);
    }
}
