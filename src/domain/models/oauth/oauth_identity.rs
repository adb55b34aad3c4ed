//! 검증을 통과한 외부 IdP 신원

use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 서명/audience/issuer 검증이 끝난 assertion에서 뽑아낸 값.
/// 이 타입은 검증기만 만들어야 한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthIdentity {
    pub provider: AuthProvider,
    /// IdP 쪽 사용자 고유 ID (`sub`)
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl OAuthIdentity {
    /// 이름 클레임이 없으면 이메일 로컬 파트를 표시 이름으로 쓴다.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.email.split('@').next().unwrap_or_default().to_string(),
        }
    }
}
