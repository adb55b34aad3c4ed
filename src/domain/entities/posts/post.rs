use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::models::game::GameType;

/// 게시글. 작성자와 랭킹은 id로만 참조하고, 응답 시점에 따로 조회해 조립한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub game_type: GameType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking_id: Option<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Post {
    pub fn new(
        user_id: ObjectId,
        content: String,
        image_url: Option<String>,
        game_type: GameType,
        ranking_id: Option<ObjectId>,
    ) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            user_id,
            content,
            image_url,
            game_type,
            ranking_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        &self.user_id == user_id
    }
}
