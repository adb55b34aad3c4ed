use serde::Serialize;

use crate::domain::dto::comments::CommentResponse;
use crate::domain::dto::rankings::RankingResponse;
use crate::domain::entities::posts::Post;
use crate::domain::entities::rankings::GameRanking;
use crate::domain::entities::users::User;
use crate::domain::models::game::GameType;
use crate::utils::time_utils::format_api_datetime;

/// 게시글에 붙는 최근 댓글 수
pub const RECENT_COMMENT_LIMIT: i64 = 3;

#[derive(Debug, Clone, Serialize)]
pub struct PostAuthor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub picture: String,
}

impl From<&User> for PostAuthor {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            picture: user.avatar.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub game_type: GameType,
    pub user: Option<PostAuthor>,
    pub game_ranking: Option<RankingResponse>,
    pub comment_count: u64,
    /// 최신순 최대 [`RECENT_COMMENT_LIMIT`]개
    pub recent_comments: Vec<CommentResponse>,
}

/// 게시글 하나를 응답으로 조립하는 데 필요한 연관 데이터
pub struct PostParts<'a> {
    pub author: Option<&'a User>,
    pub ranking: Option<&'a GameRanking>,
    pub comment_count: u64,
    pub recent_comments: Vec<CommentResponse>,
}

impl PostResponse {
    pub fn assemble(post: &Post, parts: PostParts<'_>) -> Self {
        Self {
            id: post.id.map(|id| id.to_hex()).unwrap_or_default(),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
            created_at: format_api_datetime(post.created_at),
            updated_at: format_api_datetime(post.updated_at),
            game_type: post.game_type,
            user: parts.author.map(PostAuthor::from),
            game_ranking: parts.ranking.map(RankingResponse::from),
            comment_count: parts.comment_count,
            recent_comments: parts.recent_comments,
        }
    }
}
