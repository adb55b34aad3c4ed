//! 게임 랭킹 조회 (`/api/rankings`, 공개)

use actix_web::{get, web, HttpResponse};

use crate::core::errors::AppError;
use crate::services::rankings::RankingService;

#[get("")]
pub async fn list_rankings() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(RankingService::instance().list_all().await?))
}

#[get("/game/{game_type}")]
pub async fn rankings_by_game(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let rankings = RankingService::instance().list_by_game(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(rankings))
}
