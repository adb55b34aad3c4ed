//! 인증 요청 DTO

use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::{deserialize_email, validate_not_blank, validate_password_bytes};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 6, message = "비밀번호는 6자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_bytes", message = "비밀번호는 71바이트 이하여야 합니다"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "이름은 1-50자 사이여야 합니다"))]
    #[validate(custom(function = "validate_not_blank", message = "이름을 입력해주세요"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// Google Identity Services가 돌려준 ID 토큰
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OAuthLoginRequest {
    #[serde(alias = "idToken", alias = "assertion")]
    #[validate(length(min = 1, message = "credential이 필요합니다"))]
    pub credential: String,
}
