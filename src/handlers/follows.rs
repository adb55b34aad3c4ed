//! 팔로우 핸들러 (`/api/follow`, 인증 필요)

use actix_web::{delete, get, post, web, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::follows::FollowService;

#[get("/is-following/{target_id}")]
pub async fn is_following(user: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = FollowService::instance().is_following(&user, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/{target_id}")]
pub async fn follow(user: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    FollowService::instance().follow(&user, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "followed" })))
}

#[delete("/{target_id}")]
pub async fn unfollow(user: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    FollowService::instance().unfollow(&user, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "unfollowed" })))
}

#[get("/{user_id}/followers/count")]
pub async fn followers_count(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = FollowService::instance().followers_count(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{user_id}/following/count")]
pub async fn following_count(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = FollowService::instance().following_count(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{user_id}/followers")]
pub async fn followers(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let users = FollowService::instance().followers(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/{user_id}/following")]
pub async fn following(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let users = FollowService::instance().following(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(users))
}
