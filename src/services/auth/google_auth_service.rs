//! # Google ID 토큰 검증
//!
//! 프론트엔드가 Google Identity Services로 받은 ID 토큰(`credential`)을 서버에서 검증합니다.
//!
//! ```text
//! credential (RS256 JWT)
//!   ├─ header.kid → Google JWKS에서 공개키 선택 (1시간 캐시, 모르는 kid면 즉시 재조회)
//!   ├─ 서명, exp, aud == GOOGLE_CLIENT_ID, iss ∈ {accounts.google.com, https://accounts.google.com}
//!   └─ email 필수, email_verified == true
//!        ↓
//!   OAuthIdentity { provider: google, subject, email, name, picture }
//! ```
//!
//! 검증 실패는 모두 `AppError::InvalidAssertion`(400), 공개키 조회 실패는
//! `AppError::ExternalServiceError`(502)입니다.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use singleton_macro::service;

use crate::config::{AuthProvider, AuthSettings, GoogleOAuthConfig};
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::oauth::{GoogleIdTokenClaims, OAuthIdentity};
use crate::utils::string_utils::normalize_email;

/// 외부 IdP assertion 검증기
#[async_trait]
pub trait AssertionVerifier: Send + Sync {
    async fn verify(&self, assertion: &str) -> AppResult<OAuthIdentity>;
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

#[service(name = "googleauth")]
pub struct GoogleAuthService {
    settings: Arc<AuthSettings>,
    http: reqwest::Client,
    keys: RwLock<Option<CachedKeys>>,
}

impl GoogleAuthService {
    pub fn with_settings(settings: Arc<AuthSettings>) -> Self {
        Self {
            settings,
            http: reqwest::Client::new(),
            keys: RwLock::new(None),
        }
    }

    fn cached_key(&self, kid: &str) -> Option<Jwk> {
        let max_age = Duration::from_secs(GoogleOAuthConfig::jwks_cache_seconds().max(0) as u64);
        let guard = self.keys.read().unwrap_or_else(|poisoned| poisoned.into_inner());

        guard
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < max_age)
            .and_then(|cached| cached.keys.find(kid).cloned())
    }

    async fn fetch_keys(&self) -> AppResult<JwkSet> {
        let uri = GoogleOAuthConfig::certs_uri();
        log::info!("Google 공개키(JWKS) 조회: {}", uri);

        let response = self
            .http
            .get(&uri)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google JWKS 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Google JWKS 응답 오류: {}",
                response.status()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google JWKS 파싱 실패: {}", e)))
    }

    /// `kid`에 해당하는 공개키. 캐시에 없으면 한 번 새로 받아 봅니다.
    async fn key_for(&self, kid: &str) -> AppResult<Jwk> {
        if let Some(jwk) = self.cached_key(kid) {
            return Ok(jwk);
        }

        let keys = self.fetch_keys().await?;
        let found = keys.find(kid).cloned();

        *self.keys.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });

        found.ok_or_else(|| AppError::InvalidAssertion("unknown signing key".to_string()))
    }
}

/// 검증된 클레임을 로컬 계정 연결용 신원으로 변환
fn identity_from_claims(claims: GoogleIdTokenClaims) -> AppResult<OAuthIdentity> {
    let email = claims
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| AppError::InvalidAssertion("email claim missing".to_string()))?;

    if !claims.email_verified {
        return Err(AppError::InvalidAssertion("email not verified".to_string()));
    }

    Ok(OAuthIdentity {
        provider: AuthProvider::Google,
        subject: claims.sub,
        email,
        name: claims.name.filter(|name| !name.trim().is_empty()),
        picture: claims.picture.filter(|picture| !picture.is_empty()),
    })
}

#[async_trait]
impl AssertionVerifier for GoogleAuthService {
    async fn verify(&self, assertion: &str) -> AppResult<OAuthIdentity> {
        let client_id = self.settings.google_client_id.as_deref().ok_or_else(|| {
            log::error!("GOOGLE_CLIENT_ID 미설정 상태에서 Google 로그인 요청");
            AppError::InternalError("Google sign-in is not configured".to_string())
        })?;

        let header = decode_header(assertion)
            .map_err(|_| AppError::InvalidAssertion("malformed credential".to_string()))?;
        if header.alg != Algorithm::RS256 {
            return Err(AppError::InvalidAssertion("unexpected signing algorithm".to_string()));
        }
        let kid = header
            .kid
            .ok_or_else(|| AppError::InvalidAssertion("credential has no key id".to_string()))?;

        let jwk = self.key_for(&kid).await?;
        let key = DecodingKey::from_jwk(&jwk)
            .map_err(|e| AppError::ExternalServiceError(format!("Google 공개키 형식 오류: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[client_id]);
        validation.set_issuer(&GoogleOAuthConfig::issuers());
        validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);

        let data = decode::<GoogleIdTokenClaims>(assertion, &key, &validation).map_err(|e| {
            log::warn!("Google ID 토큰 거부: {:?}", e.kind());
            AppError::InvalidAssertion("credential verification failed".to_string())
        })?;

        identity_from_claims(data.claims)
    }
}
