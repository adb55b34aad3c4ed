//! 세션 토큰 클레임

use serde::{Deserialize, Serialize};

/// HS256으로 서명되는 토큰 본문. 사용자 식별자와 유효 기간만 담는다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ObjectId (hex)
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}
