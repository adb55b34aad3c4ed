use serde::Deserialize;
use validator::Validate;

use crate::domain::models::game::GameType;
use crate::utils::string_utils::{deserialize_optional_string, validate_not_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(max = 5000, message = "게시글은 5000자 이하여야 합니다"))]
    #[validate(custom(function = "validate_not_blank", message = "내용을 입력해주세요"))]
    pub content: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "유효한 이미지 URL이 아닙니다"))]
    pub image_url: Option<String>,

    /// 없으면 `GENERAL`
    #[serde(default)]
    pub game_type: Option<GameType>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub ranking_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(length(max = 5000, message = "게시글은 5000자 이하여야 합니다"))]
    #[validate(custom(function = "validate_not_blank", message = "내용을 입력해주세요"))]
    pub content: String,

    /// 없으면 기존 이미지를 유지
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "유효한 이미지 URL이 아닙니다"))]
    pub image_url: Option<String>,
}
