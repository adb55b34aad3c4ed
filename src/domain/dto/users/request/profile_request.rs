use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvatarRequest {
    #[validate(url(message = "유효한 URL이 아닙니다"))]
    #[validate(length(max = 2048, message = "URL이 너무 깁니다"))]
    pub avatar_url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "이름은 1-50자 사이여야 합니다"))]
    #[validate(custom(function = "validate_not_blank", message = "이름을 입력해주세요"))]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_must_be_url() {
        let request: UpdateAvatarRequest =
            serde_json::from_str(r#"{"avatarUrl":"https://i.ibb.co/abc/me.png"}"#).unwrap();
        assert!(request.validate().is_ok());

        let request = UpdateAvatarRequest { avatar_url: "me.png".into() };
        assert!(request.validate().is_err());
    }
}
