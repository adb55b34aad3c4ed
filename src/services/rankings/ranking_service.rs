use std::sync::Arc;

use singleton_macro::service;
use validator::Validate;

use crate::core::errors::AppResult;
use crate::domain::dto::rankings::{CreateRankingRequest, RankingResponse};
use crate::domain::entities::rankings::GameRanking;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::game::GameType;
use crate::repositories::rankings::GameRankingRepository;

#[service(name = "ranking")]
pub struct RankingService {
    ranking_repo: Arc<GameRankingRepository>,
}

impl RankingService {
    pub async fn list_all(&self) -> AppResult<Vec<RankingResponse>> {
        let rankings = self.ranking_repo.find_all().await?;
        Ok(rankings.iter().map(RankingResponse::from).collect())
    }

    /// 점수 오름차순
    pub async fn list_by_game(&self, game_type: &str) -> AppResult<Vec<RankingResponse>> {
        let game_type: GameType = game_type.parse()?;
        let rankings = self.ranking_repo.find_by_game_type(game_type).await?;
        Ok(rankings.iter().map(RankingResponse::from).collect())
    }

    pub async fn create(&self, admin: &AuthenticatedUser, request: CreateRankingRequest) -> AppResult<RankingResponse> {
        request.validate()?;

        let ranking = self
            .ranking_repo
            .create(GameRanking {
                id: None,
                game_type: request.game_type,
                ranking_name: request.ranking_name.trim().to_string(),
                ranking_score: request.ranking_score,
                ranking_type: request.ranking_type,
            })
            .await?;

        log::info!(
            "랭킹 등록: {} {} by={}",
            ranking.game_type,
            ranking.ranking_name,
            admin.user_id
        );
        Ok(RankingResponse::from(&ranking))
    }
}
