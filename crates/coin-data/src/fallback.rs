//! 제공자 직접 조회 (fallback).
//!
//! 캐시 미스 시 동기적으로 제공자에 한 번 요청합니다. 개발 환경처럼
//! 명시적으로 허용된 경우에만 사용되며, 워커의 갱신 로직도 이 조회를 공유합니다.
//! 재시도는 하지 않습니다.

use coin_core::Ticker;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::directory::SymbolMap;
use crate::provider::MarketDataProvider;

/// 심볼 → 제공자 ID → USD 가격 조회기.
#[derive(Clone)]
pub struct FallbackFetcher {
    provider: Arc<dyn MarketDataProvider>,
}

impl FallbackFetcher {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// 심볼의 현재 USD 가격.
    ///
    /// 디렉터리에 없는 심볼은 네트워크 요청 없이 `None`입니다.
    /// 연결 실패, 비정상 상태, 잘못된 응답도 모두 `None`으로 수렴합니다.
    pub async fn fetch(&self, symbol: &Ticker, directory: &SymbolMap) -> Option<f64> {
        let Some(provider_id) = directory.lookup(symbol.as_str()) else {
            debug!(%symbol, "Symbol not in directory, skipping provider call");
            return None;
        };

        match self.provider.fetch_usd_price(provider_id).await {
            Ok(Some(price)) if price.is_finite() => {
                debug!(%symbol, provider_id, price, "Fetched price from provider");
                Some(price)
            }
            Ok(_) => {
                warn!(%symbol, provider_id, provider = self.provider.name(), "Provider response had no usable USD price");
                None
            }
            Err(e) if e.is_upstream() => {
                warn!(%symbol, provider_id, provider = self.provider.name(), error = %e, "Provider price fetch failed");
                None
            }
            Err(e) => {
                error!(%symbol, provider_id, provider = self.provider.name(), error = %e, "Unexpected error during provider price fetch");
                None
            }
        }
    }
}
