use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 팔로우 관계 한 건. `(follower_id, following_id)` 쌍은 unique 인덱스로 유일하다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFollow {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub follower_id: ObjectId,
    pub following_id: ObjectId,
    pub created_at: DateTime,
}

impl UserFollow {
    pub fn new(follower_id: ObjectId, following_id: ObjectId) -> Self {
        Self {
            id: None,
            follower_id,
            following_id,
            created_at: DateTime::now(),
        }
    }
}
