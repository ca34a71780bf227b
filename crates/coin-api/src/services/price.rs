//! 가격 조회 파이프라인.
//!
//! 요청 하나에 대해 다음 순서로 판단합니다.
//!
//! 1. 심볼 대문자 정규화
//! 2. 심볼 디렉터리 로드 (없거나 만료 → 심볼 목록 일시 불가)
//! 3. 디렉터리에 없는 심볼 → 지원하지 않음
//! 4. 가격 캐시 적중 → `cache`
//! 5. fallback 허용 시 제공자 직접 조회 → 캐시에 기록 후 `fallback`
//! 6. 그 외 → 갱신 태스크 발행 후 pending (발행 실패 → 서비스 일시 불가)
//!
//! 요청 간 락은 없습니다. 캐시가 비어 있을 때 같은 심볼 요청이 동시에 들어오면
//! 제공자 조회나 태스크 발행이 중복될 수 있습니다.

use coin_core::{PriceQuote, PriceSource, RefreshTask, Ticker};
use tracing::{debug, info, warn};

use crate::metrics::{record_price_request, record_task_published};
use crate::state::AppState;

/// 가격 요청 처리 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceOutcome {
    /// 가격 확보 (캐시 또는 fallback)
    Quote(PriceQuote),
    /// 갱신 태스크 발행됨, `retry_after`초 후 재시도 권장
    Pending { retry_after: u64 },
    /// 디렉터리에 없는 심볼
    Unsupported,
    /// 디렉터리가 아직 구성되지 않았거나 만료됨
    SymbolsUnavailable,
    /// 저장소 또는 브로커 장애
    ServiceUnavailable,
}

impl PriceOutcome {
    /// 메트릭 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            PriceOutcome::Quote(quote) => quote.source.as_str(),
            PriceOutcome::Pending { .. } => "pending",
            PriceOutcome::Unsupported => "unsupported",
            PriceOutcome::SymbolsUnavailable => "symbols_unavailable",
            PriceOutcome::ServiceUnavailable => "service_unavailable",
        }
    }
}

/// 심볼의 가격을 조회합니다.
pub async fn resolve_price(state: &AppState, raw_symbol: &str) -> PriceOutcome {
    let outcome = resolve(state, Ticker::new(raw_symbol)).await;
    record_price_request(outcome.label());
    outcome
}

async fn resolve(state: &AppState, symbol: Ticker) -> PriceOutcome {
    let directory = match state.directory.load().await {
        Ok(Some(map)) if !map.is_empty() => map,
        Ok(_) => {
            warn!(%symbol, "Symbol directory not available");
            return PriceOutcome::SymbolsUnavailable;
        }
        Err(e) => {
            warn!(%symbol, error = %e, "Failed to read symbol directory");
            return PriceOutcome::ServiceUnavailable;
        }
    };

    if !directory.contains(symbol.as_str()) {
        debug!(%symbol, "Unsupported symbol");
        return PriceOutcome::Unsupported;
    }

    match state.cache.get(&symbol).await {
        Ok(Some(price)) => {
            return PriceOutcome::Quote(PriceQuote {
                symbol,
                price,
                source: PriceSource::Cache,
            });
        }
        Ok(None) => {}
        Err(e) => warn!(%symbol, error = %e, "Price cache read failed, treating as miss"),
    }

    if state.fallback_enabled {
        if let Some(price) = state.fetcher.fetch(&symbol, &directory).await {
            if let Err(e) = state.cache.set(&symbol, price).await {
                warn!(%symbol, error = %e, "Failed to write fallback price to cache");
            }
            return PriceOutcome::Quote(PriceQuote {
                symbol,
                price,
                source: PriceSource::Fallback,
            });
        }
    }

    let task = RefreshTask::new(symbol);
    match state.publisher.publish(&task).await {
        Ok(()) => {
            record_task_published("ok");
            info!(symbol = %task.symbol, "Cache miss, refresh task queued");
            PriceOutcome::Pending {
                retry_after: state.retry_after_secs,
            }
        }
        Err(e) => {
            record_task_published("error");
            warn!(symbol = %task.symbol, error = %e, "Failed to publish refresh task");
            PriceOutcome::ServiceUnavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coin_core::AppConfig;
    use coin_data::testing::{RecordingPublisher, ScriptedProvider};
    use coin_data::{ListingEntry, MemoryStore, SymbolMap};
    use std::sync::Arc;

    fn state_with(
        provider: Arc<ScriptedProvider>,
        publisher: Arc<RecordingPublisher>,
    ) -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), provider, publisher, &AppConfig::default());
        (state, store)
    }

    async fn seed_directory(state: &AppState) {
        let map = SymbolMap::from_ranked(vec![
            ListingEntry::new("btc", "bitcoin"),
            ListingEntry::new("eth", "ethereum"),
        ]);
        state.directory.save(&map).await.unwrap();
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(PriceOutcome::Pending { retry_after: 3 }.label(), "pending");
        assert_eq!(PriceOutcome::Unsupported.label(), "unsupported");
        let quote = PriceQuote {
            symbol: Ticker::new("BTC"),
            price: 1.0,
            source: PriceSource::Fallback,
        };
        assert_eq!(PriceOutcome::Quote(quote).label(), "fallback");
    }

    #[tokio::test]
    async fn test_lowercase_symbol_hits_cache() {
        let (state, _store) = state_with(
            Arc::new(ScriptedProvider::new()),
            Arc::new(RecordingPublisher::new()),
        );
        seed_directory(&state).await;
        state.cache.set(&Ticker::new("BTC"), 65000.5).await.unwrap();

        let outcome = resolve_price(&state, "btc").await;

        assert_eq!(
            outcome,
            PriceOutcome::Quote(PriceQuote {
                symbol: Ticker::new("BTC"),
                price: 65000.5,
                source: PriceSource::Cache,
            })
        );
    }

    #[tokio::test]
    async fn test_empty_stored_directory_is_unavailable() {
        let (state, _store) = state_with(
            Arc::new(ScriptedProvider::new()),
            Arc::new(RecordingPublisher::new()),
        );
        state.directory.save(&SymbolMap::default()).await.unwrap();

        assert_eq!(
            resolve_price(&state, "BTC").await,
            PriceOutcome::SymbolsUnavailable
        );
    }

    #[tokio::test]
    async fn test_fallback_writes_through() {
        let provider = Arc::new(ScriptedProvider::new().with_price("ethereum", 3100.25));
        let publisher = Arc::new(RecordingPublisher::new());
        let (state, _store) = state_with(provider.clone(), publisher.clone());
        let state = state.with_fallback(true);
        seed_directory(&state).await;

        let outcome = resolve_price(&state, "ETH").await;

        assert_eq!(outcome.label(), "fallback");
        assert_eq!(
            state.cache.get(&Ticker::new("ETH")).await.unwrap(),
            Some(3100.25)
        );
        assert_eq!(publisher.count(), 0);

        // 두 번째 요청은 캐시에서 응답
        assert_eq!(resolve_price(&state, "ETH").await.label(), "cache");
        assert_eq!(provider.price_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_failure_falls_through_to_publish() {
        let provider = Arc::new(ScriptedProvider::new().with_missing_price("bitcoin"));
        let publisher = Arc::new(RecordingPublisher::new());
        let (state, store) = state_with(provider, publisher.clone());
        let state = state.with_fallback(true);
        seed_directory(&state).await;

        let outcome = resolve_price(&state, "BTC").await;

        assert_eq!(outcome, PriceOutcome::Pending { retry_after: 3 });
        assert_eq!(publisher.published(), vec![RefreshTask::new(Ticker::new("BTC"))]);
        assert!(!store.keys().await.contains(&"crypto:BTC".to_string()));
    }

    #[tokio::test]
    async fn test_broker_failure_is_service_unavailable() {
        let (state, _store) = state_with(
            Arc::new(ScriptedProvider::new()),
            Arc::new(RecordingPublisher::failing()),
        );
        seed_directory(&state).await;

        assert_eq!(
            resolve_price(&state, "BTC").await,
            PriceOutcome::ServiceUnavailable
        );
    }
}
