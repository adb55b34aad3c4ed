use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::models::game::{GameType, RankingType};

/// 게임별 랭킹 항목. 예: (VALORANT, "Gold 2", 1200, TIER)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRanking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub game_type: GameType,
    pub ranking_name: String,
    pub ranking_score: i64,
    pub ranking_type: RankingType,
}
