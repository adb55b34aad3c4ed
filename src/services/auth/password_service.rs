//! 비밀번호 해싱 서비스 (bcrypt)
//!
//! 다이제스트에는 알고리즘, cost, salt가 모두 들어 있으므로 별도 저장이 필요 없습니다.
//! cost는 부팅 시 로드된 [`AuthSettings`]를 따릅니다.

use std::sync::Arc;

use singleton_macro::service;

use crate::config::AuthSettings;
use crate::core::errors::{AppError, AppResult};

/// bcrypt가 실제로 반영하는 입력 길이 (널 종단 포함 72바이트)
pub const MAX_PASSWORD_BYTES: usize = 71;

#[service(name = "password")]
pub struct PasswordService {
    settings: Arc<AuthSettings>,
}

impl PasswordService {
    /// DI 없이 직접 구성 (테스트, 도구용)
    pub fn with_settings(settings: Arc<AuthSettings>) -> Self {
        Self { settings }
    }

    /// 평문 비밀번호를 bcrypt 다이제스트로 변환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 빈 비밀번호, [`MAX_PASSWORD_BYTES`] 초과
    /// * `AppError::InternalError` - 해싱 실패
    pub fn hash(&self, plaintext: &str) -> AppResult<String> {
        if plaintext.is_empty() {
            return Err(AppError::ValidationError("password must not be empty".to_string()));
        }

        bcrypt::non_truncating_hash(plaintext, self.settings.bcrypt_cost).map_err(|e| match e {
            bcrypt::BcryptError::Truncation(_) => AppError::ValidationError(format!(
                "password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )),
            other => AppError::InternalError(format!("비밀번호 해싱 실패: {}", other)),
        })
    }

    /// 다이제스트가 손상됐거나 형식이 다르면 `false` (오류 아님).
    /// 길이 초과 입력은 앞부분이 같아도 일치로 보지 않습니다.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::non_truncating_verify(plaintext, digest) {
            Ok(matched) => matched,
            Err(e) => {
                log::warn!("비밀번호 다이제스트 검증 불가: {}", e);
                false
            }
        }
    }

    /// 외부 로그인 전용 계정에 넣는 추측 불가능한 비밀번호 다이제스트
    pub fn placeholder_hash(&self) -> AppResult<String> {
        self.hash(&uuid::Uuid::new_v4().to_string())
    }
}
