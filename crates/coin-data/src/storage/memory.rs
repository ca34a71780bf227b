//! 인메모리 key-value 저장소.
//!
//! Redis 없이 파이프라인을 실행하거나 테스트할 때 사용합니다.
//! 만료 시각은 `tokio::time::Instant` 기준이므로 일시정지된 tokio 시계에서
//! `tokio::time::advance`로 TTL 만료를 재현할 수 있습니다.

use async_trait::async_trait;
use coin_core::{CoinResult, KeyValueStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// 연산 횟수 통계.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreOps {
    pub gets: u64,
    pub sets: u64,
}

/// `HashMap` 기반 저장소.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    gets: AtomicU64,
    sets: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지 수행된 get/set 횟수.
    pub fn ops(&self) -> StoreOps {
        StoreOps {
            gets: self.gets.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
        }
    }

    /// 만료되지 않은 키 목록 (정렬됨).
    pub async fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> CoinResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::Relaxed);
        let now = Instant::now();

        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CoinResult<()> {
        self.sets.fetch_add(1, Ordering::Relaxed);
        let entry = Entry {
            value: value.to_string(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> CoinResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => {
                entry.expires_at = Some(now + ttl);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, key: &str) -> CoinResult<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn ping(&self) -> CoinResult<bool> {
        Ok(true)
    }
}
