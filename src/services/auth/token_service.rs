//! 세션 토큰 발급/검증 서비스
//!
//! HS256으로 서명된 JWT에 사용자 ID(`sub`)와 발급/만료 시각만 담습니다.
//! 서명 키와 수명은 부팅 시 로드된 [`AuthSettings`]에서 오며 이후 바뀌지 않습니다.
//!
//! 검증 실패 원인(서명 불일치, 만료, 형식 오류)은 로그에만 남기고,
//! 호출자에게는 항상 같은 [`AppError::invalid_token`]을 돌려줍니다.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;

use crate::config::AuthSettings;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::token::TokenClaims;

const BEARER_PREFIX: &str = "Bearer ";

#[service(name = "token")]
pub struct TokenService {
    settings: Arc<AuthSettings>,
}

impl TokenService {
    /// DI 없이 직접 구성 (테스트, 도구용)
    pub fn with_settings(settings: Arc<AuthSettings>) -> Self {
        Self { settings }
    }

    /// 설정된 수명으로 토큰 발급
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 빈 사용자 ID, 서명 실패
    pub fn issue(&self, user_id: &str) -> AppResult<String> {
        let ttl = Duration::try_hours(self.settings.token_ttl_hours).ok_or_else(|| {
            AppError::InternalError(format!("토큰 수명이 범위를 벗어났습니다: {}시간", self.settings.token_ttl_hours))
        })?;
        self.issue_with_ttl(user_id, ttl)
    }

    pub fn issue_with_ttl(&self, user_id: &str, ttl: Duration) -> AppResult<String> {
        if user_id.is_empty() {
            return Err(AppError::InternalError("cannot issue a token without a user id".to_string()));
        }

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::InternalError("token expiry overflows".to_string()))?;
        let claims = TokenClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.settings.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalError(format!("토큰 서명 실패: {}", e)))
    }

    /// 토큰을 검증하고 사용자 ID를 돌려줍니다.
    pub fn validate(&self, token: &str) -> AppResult<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.settings.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            log::warn!("토큰 검증 실패: {:?}", e.kind());
            AppError::invalid_token()
        })?;

        if data.claims.sub.is_empty() {
            log::warn!("토큰 검증 실패: 빈 sub");
            return Err(AppError::invalid_token());
        }
        Ok(data.claims.sub)
    }
}

/// `Authorization` 헤더 값에서 토큰 부분만 꺼냅니다.
///
/// 헤더가 없거나 `Bearer ` 형식이 아니면 토큰 오류와 같은 에러입니다.
pub fn extract_bearer_token(auth_header: Option<&str>) -> AppResult<&str> {
    auth_header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(AppError::invalid_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::with_settings(Arc::new(AuthSettings::for_tests()))
    }

    #[test]
    fn test_issue_then_validate() {
        let tokens = service();
        let token = tokens.issue("65f1c0ffee0000000000abcd").unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert_eq!(tokens.validate(&token).unwrap(), "65f1c0ffee0000000000abcd");
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();
        let token = tokens
            .issue_with_ttl("65f1c0ffee0000000000abcd", Duration::seconds(-5))
            .unwrap();

        let err = tokens.validate(&token).unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(ref m) if m == "invalid token"));
    }

    #[test]
    fn test_tampering_any_character_invalidates() {
        let tokens = service();
        let token = tokens.issue("65f1c0ffee0000000000abcd").unwrap();

        for (i, ch) in token.char_indices() {
            if ch == '.' {
                continue;
            }
            let replacement = if ch == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(i..i + 1, &replacement.to_string());

            assert!(tokens.validate(&tampered).is_err(), "tampered at {} still valid", i);
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue("65f1c0ffee0000000000abcd").unwrap();

        let mut other = AuthSettings::for_tests();
        other.jwt_secret = "another-secret-that-is-also-long-enough!".to_string();
        let foreign = TokenService::with_settings(Arc::new(other));

        assert!(foreign.validate(&token).is_err());
    }

    #[test]
    fn test_malformed_tokens_rejected_uniformly() {
        let tokens = service();
        for garbage in ["", "abc", "a.b.c", "Bearer x.y.z"] {
            let err = tokens.validate(garbage).unwrap_err();
            assert_eq!(err.to_string(), AppError::invalid_token().to_string());
        }
    }

    #[test]
    fn test_out_of_range_ttl_is_an_error_not_a_panic() {
        let mut settings = AuthSettings::for_tests();
        settings.token_ttl_hours = i64::MAX;
        let tokens = TokenService::with_settings(Arc::new(settings));

        let err = tokens.issue("65f1c0ffee0000000000abcd").unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[test]
    fn test_empty_user_id_not_issued() {
        assert!(service().issue("").is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert!(extract_bearer_token(None).is_err());
        assert!(extract_bearer_token(Some("Basic dXNlcjpwYXNz")).is_err());
        assert!(extract_bearer_token(Some("Bearer ")).is_err());
        assert!(extract_bearer_token(Some("bearerabc")).is_err());
    }
}
