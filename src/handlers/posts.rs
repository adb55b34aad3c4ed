//! 게시글 핸들러 (`/api/posts`, 인증 필요)
//!
//! 고정 경로(`/following`, `/user`, `/game/...`)는 `/{id}`보다 먼저 등록해야 합니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::domain::dto::posts::{CreatePostRequest, UpdatePostRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::posts::PostService;

#[post("")]
pub async fn create_post(
    user: AuthenticatedUser,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, AppError> {
    let post = PostService::instance().create(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

#[get("")]
pub async fn list_posts() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(PostService::instance().list_all().await?))
}

#[get("/following")]
pub async fn following_feed(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(PostService::instance().list_following(&user).await?))
}

#[get("/user")]
pub async fn my_posts(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(PostService::instance().list_mine(&user).await?))
}

#[get("/game/{game_type}")]
pub async fn posts_by_game(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let posts = PostService::instance().list_by_game(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[get("/{post_id}")]
pub async fn get_post(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let post = PostService::instance().get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[put("/{post_id}")]
pub async fn update_post(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, AppError> {
    let post = PostService::instance()
        .update(&user, &path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

#[delete("/{post_id}")]
pub async fn delete_post(user: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    PostService::instance().delete(&user, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "post deleted" })))
}
