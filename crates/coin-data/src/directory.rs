//! 심볼 디렉터리.
//!
//! 티커 → 제공자 ID 매핑을 시가총액 순위 목록에서 구성하여 저장소의
//! 단일 키(`symbol_map`)에 JSON으로 저장합니다. 갱신은 병합이 아닌 통째 교체이며
//! 하나의 `set` 호출로 기록되므로 읽는 쪽은 항상 이전 또는 새 매핑 전체만 봅니다.
//!
//! 키가 없으면(미구성 또는 만료) "아직 구성되지 않음"이며,
//! "지원하지 않는 심볼"과는 다른 상태입니다.

use coin_core::{KeyValueStore, Ticker};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::Result;
use crate::provider::{ListingEntry, MarketDataProvider};

/// 디렉터리가 저장되는 키.
pub const SYMBOL_MAP_KEY: &str = "symbol_map";

/// 티커 → 제공자 ID 매핑.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolMap(HashMap<String, String>);

impl SymbolMap {
    /// 순위 순서의 항목들로 매핑을 구성합니다.
    ///
    /// 같은 심볼이 여러 번 나오면 처음(시가총액이 가장 큰) 항목만 유지합니다.
    pub fn from_ranked<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ListingEntry>,
    {
        let mut map = HashMap::new();
        for entry in entries {
            let ticker = Ticker::new(&entry.symbol);
            if ticker.is_empty() {
                continue;
            }
            map.entry(ticker.as_str().to_string()).or_insert(entry.id);
        }
        Self(map)
    }

    /// 대소문자 구분 없이 제공자 ID를 조회합니다.
    pub fn lookup(&self, symbol: &str) -> Option<&str> {
        self.0.get(Ticker::new(symbol).as_str()).map(String::as_str)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.lookup(symbol).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 갱신 결과 통계.
#[derive(Debug, Clone, Default)]
pub struct RefreshStats {
    /// 요청한 페이지 수
    pub pages_requested: u32,
    /// 실패하여 건너뛴 페이지 수
    pub pages_skipped: u32,
    /// 저장된 고유 심볼 수
    pub symbols: usize,
    /// 소요 시간
    pub elapsed: Duration,
}

impl RefreshStats {
    /// 통계 요약 로그 출력
    pub fn log_summary(&self) {
        info!(
            pages_requested = self.pages_requested,
            pages_skipped = self.pages_skipped,
            symbols = self.symbols,
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "{} symbols saved",
            self.symbols
        );
    }
}

/// 저장소에 보관되는 심볼 디렉터리.
#[derive(Clone)]
pub struct SymbolDirectory {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl SymbolDirectory {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// 순위 목록 `pages`개 페이지를 받아 디렉터리를 재구성합니다.
    ///
    /// 실패한 페이지는 건너뛰고 나머지 페이지는 계속 조회합니다.
    /// 완성된 매핑은 한 번의 `set`으로 이전 매핑을 교체합니다.
    ///
    /// # Returns
    /// 저장된 고유 심볼 수
    pub async fn refresh(
        &self,
        provider: &dyn MarketDataProvider,
        pages: u32,
        per_page: u32,
    ) -> Result<usize> {
        Ok(self.refresh_with_stats(provider, pages, per_page).await?.symbols)
    }

    /// [`refresh`](Self::refresh)와 같지만 상세 통계를 반환합니다.
    pub async fn refresh_with_stats(
        &self,
        provider: &dyn MarketDataProvider,
        pages: u32,
        per_page: u32,
    ) -> Result<RefreshStats> {
        let start = Instant::now();
        let mut stats = RefreshStats {
            pages_requested: pages,
            ..Default::default()
        };
        let mut ranked: Vec<ListingEntry> = Vec::new();

        for page in 1..=pages {
            match provider.fetch_listings_page(page, per_page).await {
                Ok(entries) => ranked.extend(entries),
                Err(e) => {
                    stats.pages_skipped += 1;
                    warn!(page, provider = provider.name(), error = %e, "Listings page skipped");
                }
            }
        }

        let map = SymbolMap::from_ranked(ranked);
        self.save(&map).await?;

        stats.symbols = map.len();
        stats.elapsed = start.elapsed();
        Ok(stats)
    }

    /// 매핑을 TTL과 함께 저장합니다.
    pub async fn save(&self, map: &SymbolMap) -> Result<()> {
        let json = serde_json::to_string(map)?;
        self.store.set(SYMBOL_MAP_KEY, &json, Some(self.ttl)).await?;
        Ok(())
    }

    /// 현재 매핑을 불러옵니다. 미구성 또는 만료 상태면 `None`.
    ///
    /// 저장된 값이 손상되어 해석할 수 없으면 미구성으로 취급합니다.
    pub async fn load(&self) -> Result<Option<SymbolMap>> {
        let Some(json) = self.store.get(SYMBOL_MAP_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<SymbolMap>(&json) {
            Ok(map) => Ok(Some(map)),
            Err(e) => {
                warn!(error = %e, "Stored symbol map is corrupt, treating as absent");
                Ok(None)
            }
        }
    }

    /// 심볼의 제공자 ID를 조회합니다.
    ///
    /// 디렉터리가 없거나 심볼이 없으면 `None`.
    pub async fn lookup(&self, symbol: &str) -> Result<Option<String>> {
        Ok(self
            .load()
            .await?
            .and_then(|map| map.lookup(symbol).map(str::to_string)))
    }
}
