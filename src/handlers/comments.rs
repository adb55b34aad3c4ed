//! 댓글 핸들러 (`/api/comments`, 인증 필요)

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::domain::dto::comments::{CreateCommentRequest, UpdateCommentRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::comments::CommentService;

#[post("")]
pub async fn create_comment(
    user: AuthenticatedUser,
    payload: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    let comment = CommentService::instance().create(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(comment))
}

#[get("/post/{post_id}")]
pub async fn comments_for_post(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let comments = CommentService::instance().list_for_post(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}

#[put("/{comment_id}")]
pub async fn update_comment(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    let comment = CommentService::instance()
        .update(&user, &path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[delete("/{comment_id}")]
pub async fn delete_comment(user: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    CommentService::instance().delete(&user, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "comment deleted" })))
}
