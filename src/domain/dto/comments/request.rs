use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(length(max = 1000, message = "댓글은 1000자 이하여야 합니다"))]
    #[validate(custom(function = "validate_not_blank", message = "댓글 내용을 입력해주세요"))]
    pub content: String,

    #[validate(length(min = 1, message = "postId가 필요합니다"))]
    pub post_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(max = 1000, message = "댓글은 1000자 이하여야 합니다"))]
    #[validate(custom(function = "validate_not_blank", message = "댓글 내용을 입력해주세요"))]
    pub content: String,
}
