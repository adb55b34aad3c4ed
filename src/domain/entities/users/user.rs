//! 사용자 엔티티
//!
//! 로컬(이메일/비밀번호) 계정과 Google 연동 계정을 하나의 문서로 표현합니다.
//! `email`은 unique 인덱스로 전역 유일성이 보장됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

fn default_roles() -> Vec<String> {
    vec![ROLE_USER.to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub name: String,
    /// bcrypt 해시. Google로 처음 가입한 계정은 아무도 모르는 임의 값의 해시를 가진다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 아바타 URL, 없으면 빈 문자열
    #[serde(default)]
    pub avatar: String,
    pub provider: AuthProvider,
    /// 외부 IdP의 subject (`sub`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    pub fn new_local(email: String, name: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            name,
            password_hash: Some(password_hash),
            avatar: String::new(),
            provider: AuthProvider::Local,
            provider_id: None,
            roles: default_roles(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn new_oauth(
        email: String,
        name: String,
        picture: Option<String>,
        provider: AuthProvider,
        provider_id: String,
        placeholder_hash: String,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            name,
            password_hash: Some(placeholder_hash),
            avatar: picture.unwrap_or_default(),
            provider,
            provider_id: Some(provider_id),
            roles: default_roles(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }

    pub fn password_digest(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }
}
