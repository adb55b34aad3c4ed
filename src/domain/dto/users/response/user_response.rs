use serde::Serialize;

use crate::config::AuthProvider;
use crate::domain::entities::users::User;
use crate::utils::time_utils::format_api_datetime;

/// 본인 프로필
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub provider: AuthProvider,
}

impl From<&User> for UserProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            provider: user.provider,
        }
    }
}

/// 다른 사용자에게 보여주는 요약
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserResponse {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarUpdatedResponse {
    pub message: String,
    pub avatar_url: String,
}

/// 관리자 사용자 목록 항목
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: String,
    pub provider: AuthProvider,
    pub roles: Vec<String>,
    pub created_at: String,
}

impl From<&User> for AdminUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            provider: user.provider,
            roles: user.roles.clone(),
            created_at: format_api_datetime(user.created_at),
        }
    }
}
