use serde::Serialize;

use crate::domain::entities::comments::Comment;
use crate::domain::entities::users::User;
use crate::utils::time_utils::format_api_datetime;

#[derive(Debug, Clone, Serialize)]
pub struct CommentAuthor {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    /// 탈퇴 등으로 작성자가 없으면 `null`
    pub user: Option<CommentAuthor>,
    pub post_id: String,
}

impl CommentResponse {
    pub fn from_parts(comment: &Comment, author: Option<&User>) -> Self {
        Self {
            id: comment.id.map(|id| id.to_hex()).unwrap_or_default(),
            content: comment.content.clone(),
            created_at: format_api_datetime(comment.created_at),
            updated_at: format_api_datetime(comment.updated_at),
            user: author.map(|user| CommentAuthor {
                id: user.id_string(),
                name: user.name.clone(),
                email: user.email.clone(),
            }),
            post_id: comment.post_id.to_hex(),
        }
    }
}
