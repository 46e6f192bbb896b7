//! # Redis 캐시 클라이언트
//!
//! 리포지토리 계층의 read-through 캐시로 사용됩니다. 값은 JSON 문자열로 저장되며
//! 키 규칙은 다음과 같습니다.
//!
//! | 키 | 내용 | TTL |
//! |----|------|-----|
//! | `user:{id}` | 사용자 문서 | 600초 |
//! | `user:email:{email}` | 사용자 문서 | 600초 |
//! | `post:{id}` | 게시글 문서 | 60초 |
//!
//! 캐시는 보조 수단이므로 호출하는 쪽에서 에러를 무시해도 요청은 정상 처리되어야 합니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, ErrorKind, RedisError};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

/// Redis 캐시 클라이언트 래퍼
///
/// 내부적으로 [`ConnectionManager`]를 사용합니다. 연결이 끊기면 자동으로 재연결하며
/// 복제 비용이 낮아 요청마다 clone해서 사용합니다.
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// `REDIS_URL`(기본 `redis://localhost:6379`)로 연결하고 `PING`으로 확인합니다.
    pub async fn new() -> Result<Self, RedisError> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;
        let mut manager = ConnectionManager::new(client).await?;

        redis::cmd("PING").query_async::<()>(&mut manager).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RedisError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;

        value.map(|json| decode(&json)).transpose()
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), RedisError> {
        let mut conn = self.manager.clone();
        conn.set(key, encode(value)?).await
    }

    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        seconds: usize,
    ) -> Result<(), RedisError> {
        let mut conn = self.manager.clone();
        conn.set_ex(key, encode(value)?, seconds as u64).await
    }

    pub async fn del(&self, key: &str) -> Result<(), RedisError> {
        let mut conn = self.manager.clone();
        conn.del(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.manager.clone();
        conn.del(keys).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, RedisError> {
        let mut conn = self.manager.clone();
        conn.keys(pattern).await
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, RedisError> {
    serde_json::to_string(value).map_err(|e| {
        RedisError::from((ErrorKind::TypeError, "Serialization failed", e.to_string()))
    })
}

fn decode<T: DeserializeOwned>(json: &str) -> Result<T, RedisError> {
    serde_json::from_str(json).map_err(|e| {
        RedisError::from((ErrorKind::TypeError, "Deserialization failed", e.to_string()))
    })
}
