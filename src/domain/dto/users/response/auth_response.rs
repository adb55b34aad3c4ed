//! 인증 성공 응답

use serde::Serialize;

use crate::domain::entities::users::User;

/// 회원가입/로그인 응답
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    pub name: String,
    pub avatar: String,
}

impl AuthResponse {
    pub fn new(token: String, user: &User) -> Self {
        Self {
            token,
            email: user.email.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Google 로그인 응답
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthAuthResponse {
    pub token: String,
    pub email: String,
    pub name: String,
    pub picture_url: String,
}

impl OAuthAuthResponse {
    pub fn new(token: String, user: &User) -> Self {
        Self {
            token,
            email: user.email.clone(),
            name: user.name.clone(),
            picture_url: user.avatar.clone(),
        }
    }
}
