//! 관리자 핸들러 (`/api/admin`, `admin` 역할 필요)

use actix_web::{delete, get, post, web, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::domain::dto::rankings::CreateRankingRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::comments::CommentService;
use crate::services::posts::PostService;
use crate::services::rankings::RankingService;
use crate::services::users::UserService;

#[get("/users")]
pub async fn list_users() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(UserService::instance().list_users().await?))
}

#[delete("/users/{user_id}")]
pub async fn delete_user(admin: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    UserService::instance().delete_user(&admin, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "user deleted" })))
}

#[get("/posts")]
pub async fn list_posts() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(PostService::instance().list_all().await?))
}

#[delete("/posts/{post_id}")]
pub async fn delete_post(admin: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    PostService::instance().delete_as_admin(&admin, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "post deleted" })))
}

#[get("/comments")]
pub async fn list_comments() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(CommentService::instance().list_all().await?))
}

#[post("/rankings")]
pub async fn create_ranking(
    admin: AuthenticatedUser,
    payload: web::Json<CreateRankingRequest>,
) -> Result<HttpResponse, AppError> {
    let ranking = RankingService::instance().create(&admin, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(ranking))
}
