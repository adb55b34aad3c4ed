//! 문자열 정규화 유틸리티

use serde::Deserialize;

/// 이메일 비교/저장용 정규화 (앞뒤 공백 제거 + 소문자)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 공백뿐인 문자열은 `None`으로, 나머지는 trim 해서 돌려줍니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `#[serde(deserialize_with = "...")]` 용. 빈 문자열을 `None`으로 받습니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// `validator`의 custom 검증 함수: 공백만 있는 값 거부
pub fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if is_blank(value) {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// `validator`의 custom 검증 함수: bcrypt 입력 한도(바이트 기준) 초과 거부
pub fn validate_password_bytes(value: &str) -> Result<(), validator::ValidationError> {
    if value.len() > crate::services::auth::password_service::MAX_PASSWORD_BYTES {
        return Err(validator::ValidationError::new("password_too_long"));
    }
    Ok(())
}

/// `#[serde(deserialize_with = "...")]` 용. 이메일을 trim + 소문자로 받습니다.
pub fn deserialize_email<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_email(&raw))
}
