//! Redis 기반 key-value 저장소.
//!
//! 심볼 디렉터리와 가격 캐시가 공유하는 운영 저장소입니다.
//! 각 명령은 단일 키에 대해 원자적으로 실행됩니다.

use async_trait::async_trait;
use coin_core::{CoinError, CoinResult, KeyValueStore};
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use std::time::Duration;
use tracing::{info, instrument};

use crate::error::{DataError, Result};

/// Redis 연결 래퍼.
///
/// `ConnectionManager`는 연결이 끊기면 자동으로 재연결합니다.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    /// 새로운 Redis 연결을 생성합니다.
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to Redis...");

        let client = Client::open(url).map_err(|e| DataError::CacheError(e.to_string()))?;
        let connection = ConnectionManager::new(client).await?;

        info!("Redis connection established");

        Ok(Self { connection })
    }
}

/// TTL을 Redis가 받는 초 단위로 변환합니다. 0초는 1초로 올립니다.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

fn store_error(err: redis::RedisError) -> CoinError {
    CoinError::Store(err.to_string())
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> CoinResult<Option<String>> {
        let mut conn = self.connection.clone();
        conn.get(key).await.map_err(store_error)
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CoinResult<()> {
        let mut conn = self.connection.clone();
        match ttl {
            Some(ttl) => conn
                .set_ex::<_, _, ()>(key, value, ttl_secs(ttl))
                .await
                .map_err(store_error),
            None => conn.set::<_, _, ()>(key, value).await.map_err(store_error),
        }
    }

    async fn expire(&self, key: &str, ttl: Duration) -> CoinResult<bool> {
        let mut conn = self.connection.clone();
        conn.expire(key, ttl_secs(ttl) as i64)
            .await
            .map_err(store_error)
    }

    async fn delete(&self, key: &str) -> CoinResult<bool> {
        let mut conn = self.connection.clone();
        let deleted: i64 = conn.del(key).await.map_err(store_error)?;
        Ok(deleted > 0)
    }

    async fn ping(&self) -> CoinResult<bool> {
        let mut conn = self.connection.clone();
        let result: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(store_error)?;
        Ok(result == "PONG")
    }
}
