//! 사용자 프로필 핸들러 (`/api/users`, 인증 필요)

use actix_web::{get, put, web, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::dto::users::{UpdateAvatarRequest, UpdateProfileRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::users::UserService;

#[get("/profile")]
pub async fn get_profile(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let profile = UserService::instance().profile(&user).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/profile")]
pub async fn update_profile(
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let profile = UserService::instance().update_profile(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/avatar")]
pub async fn update_avatar(
    user: AuthenticatedUser,
    payload: web::Json<UpdateAvatarRequest>,
) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().update_avatar(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{user_id}")]
pub async fn get_user(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let user = UserService::instance().public_profile(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}
