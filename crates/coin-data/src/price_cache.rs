//! 가격 캐시.
//!
//! 심볼별 마지막 USD 가격을 짧은 TTL로 보관합니다. 키는 `crypto:{SYMBOL}`.
//! 미스는 "최근 가격을 모름"일 뿐 심볼이 잘못되었다는 뜻이 아닙니다.

use coin_core::{KeyValueStore, Ticker};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::Result;

/// 가격 키 접두사.
pub const PRICE_KEY_PREFIX: &str = "crypto:";

/// 심볼의 캐시 키.
pub fn price_key(symbol: &Ticker) -> String {
    format!("{}{}", PRICE_KEY_PREFIX, symbol)
}

/// 저장소 위의 가격 캐시.
#[derive(Clone)]
pub struct PriceCache {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl PriceCache {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 캐시된 가격. 미설정/만료면 `None`.
    ///
    /// 숫자로 해석할 수 없는 값은 미스로 취급합니다.
    pub async fn get(&self, symbol: &Ticker) -> Result<Option<f64>> {
        let key = price_key(symbol);
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(None);
        };

        match raw.parse::<f64>() {
            Ok(price) if price.is_finite() => Ok(Some(price)),
            _ => {
                warn!(%symbol, value = %raw, "Cached price is not a number, ignoring");
                Ok(None)
            }
        }
    }

    /// 가격을 캐시 TTL과 함께 기록합니다.
    ///
    /// 실제 가격만 받으므로 실패한 조회가 캐시에 남을 수 없습니다.
    pub async fn set(&self, symbol: &Ticker, price: f64) -> Result<()> {
        let key = price_key(symbol);
        self.store
            .set(&key, &price.to_string(), Some(self.ttl))
            .await?;
        debug!(%symbol, price, ttl_secs = self.ttl.as_secs(), "Price cached");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn cache(store: Arc<MemoryStore>) -> PriceCache {
        PriceCache::new(store, Duration::from_secs(60))
    }

    #[test]
    fn test_price_key() {
        assert_eq!(price_key(&Ticker::new("btc")), "crypto:BTC");
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_trip_then_expiry() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache(store);
        let btc = Ticker::new("BTC");

        cache.set(&btc, 65000.5).await.unwrap();
        assert_eq!(cache.get(&btc).await.unwrap(), Some(65000.5));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get(&btc).await.unwrap(), Some(65000.5));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get(&btc).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_miss_and_garbage_are_absent() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache(store.clone());
        let eth = Ticker::new("ETH");

        assert_eq!(cache.get(&eth).await.unwrap(), None);

        store.set("crypto:ETH", "None", None).await.unwrap();
        assert_eq!(cache.get(&eth).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_symbols_do_not_collide() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache(store.clone());

        cache.set(&Ticker::new("btc"), 1.0).await.unwrap();
        cache.set(&Ticker::new("ETH"), 2.0).await.unwrap();

        assert_eq!(store.keys().await, vec!["crypto:BTC", "crypto:ETH"]);
        assert_eq!(cache.get(&Ticker::new("BTC")).await.unwrap(), Some(1.0));
    }
}
