use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub post_id: ObjectId,
    pub user_id: ObjectId,
    pub content: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Comment {
    pub fn new(post_id: ObjectId, user_id: ObjectId, content: String) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            post_id,
            user_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}
