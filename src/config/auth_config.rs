//! # 인증 설정
//!
//! 토큰 서명 키, 토큰 수명, bcrypt 비용, Google 클라이언트 ID 등 인증 관련 설정을 관리합니다.
//!
//! 요청 처리 중에 환경 변수를 다시 읽지 않도록, 인증 컴포넌트가 쓰는 값은
//! 부팅 시 한 번 [`AuthSettings::from_env`]로 읽어 `ServiceLocator`에 등록합니다.
//! 이후로는 불변입니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="at-least-32-bytes-of-random-secret-material"
//! export JWT_EXPIRATION_HOURS="24"
//! export GOOGLE_CLIENT_ID="1234-abcd.apps.googleusercontent.com"
//! export BCRYPT_COST="12"
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use crate::config::data_config::{Environment, PasswordConfig};
use crate::core::errors::AppError;

/// 운영 환경에서 요구하는 HS256 서명 키 최소 길이 (바이트)
pub const MIN_SECRET_LEN: usize = 32;

const DEV_JWT_SECRET: &str = "dev-only-secret-change-me-before-deploying!!";

pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    pub fn client_id() -> Option<String> {
        env::var("GOOGLE_CLIENT_ID").ok().filter(|v| !v.trim().is_empty())
    }

    /// Google ID 토큰 서명 검증용 공개키(JWKS) 위치
    pub fn certs_uri() -> String {
        env::var("GOOGLE_CERTS_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v3/certs".to_string())
    }

    /// ID 토큰의 `iss`로 허용하는 값
    pub fn issuers() -> [&'static str; 2] {
        ["accounts.google.com", "https://accounts.google.com"]
    }

    pub fn jwks_cache_seconds() -> i64 {
        env::var("GOOGLE_JWKS_CACHE_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600)
    }
}

/// 토큰 수명 허용 범위 (1시간 ~ 1년)
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// 범위 밖이거나 숫자가 아니면 기본값 24시간
fn parse_expiration_hours(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse().ok())
        .filter(|hours: &i64| (1..=MAX_TOKEN_TTL_HOURS).contains(hours))
        .unwrap_or(DEFAULT_TOKEN_TTL_HOURS)
}

pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> Option<String> {
        env::var("JWT_SECRET").ok().filter(|v| !v.is_empty())
    }

    pub fn expiration_hours() -> i64 {
        let raw = env::var("JWT_EXPIRATION_HOURS").ok();
        let hours = parse_expiration_hours(raw.as_deref());
        if raw.is_some_and(|v| v.trim().parse::<i64>().ok() != Some(hours)) {
            log::warn!("JWT_EXPIRATION_HOURS 값이 허용 범위(1-{})를 벗어나 {}시간을 사용합니다", MAX_TOKEN_TTL_HOURS, hours);
        }
        hours
    }
}

/// 부팅 시 한 번 로드되는 불변 인증 설정
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub google_client_id: Option<String>,
    pub bcrypt_cost: u32,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("google_client_id", &self.google_client_id)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AuthSettings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::resolve(&Environment::current(), JwtConfig::secret())
    }

    fn resolve(environment: &Environment, secret: Option<String>) -> Result<Self, AppError> {
        let jwt_secret = match (secret, environment) {
            (Some(secret), Environment::Production) if secret.len() < MIN_SECRET_LEN => {
                return Err(AppError::InternalError(format!(
                    "JWT_SECRET must be at least {} bytes in production",
                    MIN_SECRET_LEN
                )));
            }
            (Some(secret), _) => secret,
            (None, Environment::Production) => {
                return Err(AppError::InternalError("JWT_SECRET must be set in production".to_string()));
            }
            (None, _) => {
                log::warn!("JWT_SECRET 미설정: 개발용 기본 키를 사용합니다 (운영 환경 사용 금지)");
                DEV_JWT_SECRET.to_string()
            }
        };

        let google_client_id = GoogleOAuthConfig::client_id();
        if google_client_id.is_none() {
            log::warn!("GOOGLE_CLIENT_ID 미설정: Google 로그인이 비활성화됩니다");
        }

        Ok(Self {
            jwt_secret,
            token_ttl_hours: JwtConfig::expiration_hours(),
            google_client_id,
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
        })
    }

    /// 테스트용 설정 (bcrypt 최소 비용)
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            jwt_secret: "unit-test-secret-that-is-long-enough-000".to_string(),
            token_ttl_hours: 1,
            google_client_id: Some("test-client.apps.googleusercontent.com".to_string()),
            bcrypt_cost: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Local,

    Google,
}

impl AuthProvider {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
        }
    }
}
