use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::rankings::GameRanking;
use crate::domain::models::game::{GameType, RankingType};
use crate::utils::string_utils::validate_not_blank;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub id: String,
    pub game_type: GameType,
    pub ranking_name: String,
    pub ranking_score: i64,
    pub ranking_type: RankingType,
}

impl From<&GameRanking> for RankingResponse {
    fn from(ranking: &GameRanking) -> Self {
        Self {
            id: ranking.id.map(|id| id.to_hex()).unwrap_or_default(),
            game_type: ranking.game_type,
            ranking_name: ranking.ranking_name.clone(),
            ranking_score: ranking.ranking_score,
            ranking_type: ranking.ranking_type,
        }
    }
}

/// 관리자 랭킹 등록
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRankingRequest {
    pub game_type: GameType,

    #[validate(length(max = 50, message = "랭킹 이름은 50자 이하여야 합니다"))]
    #[validate(custom(function = "validate_not_blank", message = "랭킹 이름을 입력해주세요"))]
    pub ranking_name: String,

    #[validate(range(min = 0, message = "점수는 0 이상이어야 합니다"))]
    pub ranking_score: i64,

    pub ranking_type: RankingType,
}
