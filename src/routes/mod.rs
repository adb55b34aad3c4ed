//! API 라우트 설정 모듈
//!
//! 모든 API는 `/api` 아래에 기능별 scope로 묶입니다. 인증 레벨은 scope 단위로
//! `AuthMiddleware`를 감싸서 정합니다.
//!
//! | scope | 인증 |
//! |-------|------|
//! | `/api/auth` | 없음 (`/me`는 핸들러에서 직접 확인) |
//! | `/api/rankings` | 없음 |
//! | `/api/users`, `/api/posts`, `/api/comments`, `/api/follow` | 로그인 필요 |
//! | `/api/admin` | `admin` 역할 필요 |
//!
//! actix는 등록 순서대로 매칭하므로 `/profile`, `/following` 같은 고정 경로를
//! `/{id}` 보다 먼저 등록합니다.
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::{error, get, web, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::domain::entities::users::ROLE_ADMIN;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    cfg.service(health_check);

    cfg.service(
        web::scope("/api")
            .configure(configure_auth_routes)
            .configure(configure_user_routes)
            .configure(configure_post_routes)
            .configure(configure_comment_routes)
            .configure(configure_follow_routes)
            .configure(configure_ranking_routes)
            .configure(configure_admin_routes),
    );
}

/// JSON 본문 파싱 실패도 다른 입력 오류와 같은 `{"error": ...}` 400 응답으로 맞춥니다.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("JSON 본문 거부: {}", err);
        let message = match &err {
            error::JsonPayloadError::ContentType => "expected application/json body".to_string(),
            _ => "malformed JSON body".to_string(),
        };
        AppError::ValidationError(message).into()
    })
}

/// 회원가입, 로그인, Google 로그인, 현재 사용자 조회
///
/// ```bash
/// curl -X POST http://localhost:8080/api/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"gamer@example.com","password":"password123"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::signup)
            .service(handlers::auth::login)
            .service(handlers::auth::oauth)
            .service(handlers::auth::google)
            .service(handlers::auth::me),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::get_profile)
            .service(handlers::users::update_profile)
            .service(handlers::users::update_avatar)
            .service(handlers::users::get_user),
    );
}

fn configure_post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .wrap(AuthMiddleware::required())
            .service(handlers::posts::create_post)
            .service(handlers::posts::list_posts)
            .service(handlers::posts::following_feed)
            .service(handlers::posts::my_posts)
            .service(handlers::posts::posts_by_game)
            .service(handlers::posts::get_post)
            .service(handlers::posts::update_post)
            .service(handlers::posts::delete_post),
    );
}

fn configure_comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments")
            .wrap(AuthMiddleware::required())
            .service(handlers::comments::create_comment)
            .service(handlers::comments::comments_for_post)
            .service(handlers::comments::update_comment)
            .service(handlers::comments::delete_comment),
    );
}

fn configure_follow_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/follow")
            .wrap(AuthMiddleware::required())
            .service(handlers::follows::is_following)
            .service(handlers::follows::followers_count)
            .service(handlers::follows::following_count)
            .service(handlers::follows::followers)
            .service(handlers::follows::following)
            .service(handlers::follows::follow)
            .service(handlers::follows::unfollow),
    );
}

fn configure_ranking_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rankings")
            .service(handlers::rankings::list_rankings)
            .service(handlers::rankings::rankings_by_game),
    );
}

/// 관리자 전용
fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AuthMiddleware::required_with_role(ROLE_ADMIN))
            .service(handlers::admin::list_users)
            .service(handlers::admin::delete_user)
            .service(handlers::admin::list_posts)
            .service(handlers::admin::delete_post)
            .service(handlers::admin::list_comments)
            .service(handlers::admin::create_ranking),
    );
}

/// 로드밸런서/모니터링용 헬스체크
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "game_social_backend",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "features": { "database": "MongoDB", "cache": "Redis", "dependency_injection": "Singleton Macro" }
/// }
/// ```
#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}
