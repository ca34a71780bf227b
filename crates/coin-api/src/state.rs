//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 요청 간에 공유됩니다. 요청 간 공유 상태는 모두
//! 외부 key-value 저장소에 있으므로 상태 자체에는 락이 없습니다.

use coin_core::{AppConfig, KeyValueStore};
use coin_data::{
    FallbackFetcher, MarketDataProvider, PriceCache, SymbolDirectory, TaskPublisher,
};
use std::sync::Arc;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 디렉터리와 가격 캐시가 공유하는 저장소
    pub store: Arc<dyn KeyValueStore>,

    /// 심볼 디렉터리 (티커 → 제공자 ID)
    pub directory: SymbolDirectory,

    /// 가격 캐시
    pub cache: PriceCache,

    /// 외부 시세 제공자 (디렉터리 갱신, fallback 조회)
    pub provider: Arc<dyn MarketDataProvider>,

    /// 제공자 직접 조회기
    pub fetcher: FallbackFetcher,

    /// 갱신 태스크 발행자
    pub publisher: Arc<dyn TaskPublisher>,

    /// 캐시 미스 시 제공자 직접 조회 허용 여부
    pub fallback_enabled: bool,

    /// pending 응답의 재시도 권장 시간 (초)
    pub retry_after_secs: u64,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    ///
    /// # 인자
    /// * `store` - 디렉터리/가격 캐시 저장소
    /// * `provider` - 외부 시세 제공자
    /// * `publisher` - 갱신 태스크 발행자
    /// * `config` - TTL, fallback 여부 등 설정
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        provider: Arc<dyn MarketDataProvider>,
        publisher: Arc<dyn TaskPublisher>,
        config: &AppConfig,
    ) -> Self {
        Self {
            directory: SymbolDirectory::new(store.clone(), config.directory.ttl()),
            cache: PriceCache::new(store.clone(), config.price.ttl()),
            fetcher: FallbackFetcher::new(provider.clone()),
            store,
            provider,
            publisher,
            fallback_enabled: config.price.fallback_enabled,
            retry_after_secs: config.price.retry_after_secs,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// fallback 모드 설정.
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }

    /// 저장소 연결 상태 확인.
    pub async fn is_store_healthy(&self) -> bool {
        self.store.ping().await.unwrap_or(false)
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// 인메모리 저장소, 응답이 비어 있는 provider, 기록만 하는 publisher로
/// 외부 연결 없이 상태를 만듭니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use coin_data::testing::{RecordingPublisher, ScriptedProvider};
    use coin_data::MemoryStore;

    AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(ScriptedProvider::new()),
        Arc::new(RecordingPublisher::new()),
        &AppConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_takes_price_settings_from_config() {
        let state = create_test_state();
        assert!(!state.fallback_enabled);
        assert_eq!(state.retry_after_secs, 3);
        assert_eq!(state.cache.ttl(), std::time::Duration::from_secs(60));
        assert!(state.with_fallback(true).fallback_enabled);
    }

    #[tokio::test]
    async fn test_memory_store_is_healthy() {
        let state = create_test_state();
        assert!(state.is_store_healthy().await);
        assert!(state.uptime_secs() >= 0);
    }
}
