//! 외부 시세 제공자.
//!
//! 시가총액 순위 목록(심볼 ↔ 제공자 ID)과 USD 단가 조회 두 가지만 사용합니다.

pub mod coingecko;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use coingecko::CoinGeckoClient;

/// 순위 목록의 한 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// 티커 (제공자 응답은 소문자)
    pub symbol: String,
    /// 제공자 내부 ID (예: "bitcoin")
    pub id: String,
}

impl ListingEntry {
    pub fn new(symbol: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            id: id.into(),
        }
    }
}

/// 시세 제공자 trait.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 시가총액 내림차순 목록의 `page`번째 페이지 (1부터 시작).
    async fn fetch_listings_page(&self, page: u32, per_page: u32) -> Result<Vec<ListingEntry>>;

    /// 제공자 ID에 대한 USD 가격.
    ///
    /// 응답에 해당 ID 또는 `usd` 키가 없으면 `Ok(None)`.
    async fn fetch_usd_price(&self, provider_id: &str) -> Result<Option<f64>>;
}
