//! # Redis 캐시 클라이언트
//!
//! 값은 JSON 문자열로 저장합니다. 연결은 `ConnectionManager` 하나를 복제해서 쓰며,
//! 끊어지면 매니저가 재연결합니다.
//!
//! 캐시는 읽기 성능용 보조 저장소입니다. 호출하는 쪽은 캐시 에러를 로그만 남기고
//! 원본 저장소(MongoDB) 결과로 계속 진행해야 합니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use serde::{Serialize, de::DeserializeOwned};

use crate::config::RedisConfig;

#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

fn json_error(context: &'static str, e: serde_json::Error) -> RedisError {
    RedisError::from((redis::ErrorKind::TypeError, context, e.to_string()))
}

impl RedisClient {
    pub async fn new() -> Result<Self, RedisError> {
        let client = Client::open(RedisConfig::url())?;
        let mut manager = ConnectionManager::new(client).await?;

        redis::cmd("PING").query_async::<()>(&mut manager).await?;
        log::info!("Redis 연결 성공");

        Ok(Self { manager })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RedisError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;

        value
            .map(|json| serde_json::from_str(&json).map_err(|e| json_error("Deserialization failed", e)))
            .transpose()
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> Result<(), RedisError> {
        let mut conn = self.manager.clone();
        let json = serde_json::to_string(value).map_err(|e| json_error("Serialization failed", e))?;
        conn.set_ex(key, json, seconds).await
    }

    // `#[repository]`가 생성하는 캐시 무효화 헬퍼(invalidate_*)가 호출합니다.
    pub async fn del(&self, key: &str) -> Result<(), RedisError> {
        let mut conn = self.manager.clone();
        conn.del(key).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, RedisError> {
        let mut conn = self.manager.clone();
        conn.keys(pattern).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.manager.clone();
        conn.del(keys).await
    }
}
