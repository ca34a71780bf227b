//! `GET /price/{symbol}` 전체 파이프라인 통합 테스트.
//!
//! 인메모리 저장소, 스크립트 provider, 기록용 publisher로 외부 연결 없이
//! 디렉터리 → 캐시 → fallback → 큐 순서를 검증합니다.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use coin_api::{create_api_router, AppState};
use coin_core::{AppConfig, RefreshTask, Ticker};
use coin_data::testing::{RecordingPublisher, ScriptedProvider};
use coin_data::{ListingEntry, MemoryStore, SymbolDirectory};
use serde_json::{json, Value};
use tower::ServiceExt;

struct Harness {
    state: Arc<AppState>,
    store: Arc<MemoryStore>,
    provider: Arc<ScriptedProvider>,
    publisher: Arc<RecordingPublisher>,
}

impl Harness {
    fn new(provider: ScriptedProvider, publisher: RecordingPublisher, fallback: bool) -> Self {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(provider);
        let publisher = Arc::new(publisher);
        let state = AppState::new(
            store.clone(),
            provider.clone(),
            publisher.clone(),
            &AppConfig::default(),
        )
        .with_fallback(fallback);

        Self {
            state: Arc::new(state),
            store,
            provider,
            publisher,
        }
    }

    fn router(&self) -> Router {
        create_api_router().with_state(self.state.clone())
    }

    /// 순위 페이지 두 개로 디렉터리를 구성합니다.
    async fn build_directory(&self) {
        let listings = ScriptedProvider::new().with_pages(vec![
            Ok(vec![
                ListingEntry::new("btc", "bitcoin"),
                ListingEntry::new("eth", "ethereum"),
            ]),
            Ok(vec![ListingEntry::new("btc", "bitcoin-cash")]),
        ]);
        let directory = SymbolDirectory::new(self.store.clone(), Duration::from_secs(86_400));
        directory.refresh(&listings, 2, 250).await.unwrap();
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }
}

#[tokio::test]
async fn empty_directory_is_503_not_400() {
    let h = Harness::new(ScriptedProvider::new(), RecordingPublisher::new(), false);

    let (status, body) = h.get("/price/BTC").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"detail": "symbols temporarily unavailable"}));
    assert_eq!(h.publisher.count(), 0);
}

#[tokio::test]
async fn unsupported_symbol_touches_neither_cache_nor_queue() {
    let h = Harness::new(ScriptedProvider::new(), RecordingPublisher::new(), true);
    h.build_directory().await;
    let before = h.store.ops();

    let (status, body) = h.get("/price/DOGECOIN999").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "symbol not supported"}));

    // 디렉터리 읽기 한 번 외에는 저장소 접근 없음
    let after = h.store.ops();
    assert_eq!(after.gets - before.gets, 1);
    assert_eq!(after.sets, before.sets);
    assert_eq!(h.publisher.count(), 0);
    assert!(h.provider.price_calls().is_empty());
}

#[tokio::test]
async fn cache_miss_without_fallback_is_pending_with_one_publish() {
    let h = Harness::new(ScriptedProvider::new(), RecordingPublisher::new(), false);
    h.build_directory().await;

    let (status, body) = h.get("/price/btc").await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, json!({"status": "pending", "retry_after": 3}));
    assert_eq!(
        h.publisher.published(),
        vec![RefreshTask::new(Ticker::new("BTC"))]
    );
    assert!(h.provider.price_calls().is_empty());
}

#[tokio::test]
async fn broker_outage_is_503() {
    let h = Harness::new(ScriptedProvider::new(), RecordingPublisher::failing(), false);
    h.build_directory().await;

    let (status, body) = h.get("/price/ETH").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"detail": "service temporarily unavailable"}));
}

#[tokio::test]
async fn directory_keeps_first_ranked_provider_id() {
    let provider = ScriptedProvider::new()
        .with_price("bitcoin", 65000.5)
        .with_price("bitcoin-cash", 400.0);
    let h = Harness::new(provider, RecordingPublisher::new(), true);
    h.build_directory().await;

    let (status, body) = h.get("/price/BTC").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], json!(65000.5));
    assert_eq!(h.provider.price_calls(), vec!["bitcoin"]);
}

#[tokio::test]
async fn failed_fallback_is_not_cached() {
    let provider = ScriptedProvider::new().with_missing_price("ethereum");
    let h = Harness::new(provider, RecordingPublisher::new(), true);
    h.build_directory().await;

    let (status, _) = h.get("/price/ETH").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(!h.store.keys().await.contains(&"crypto:ETH".to_string()));

    // 다음 요청도 다시 제공자를 조회 (실패가 캐시되지 않음)
    let (status, _) = h.get("/price/ETH").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(h.provider.price_calls(), vec!["ethereum", "ethereum"]);
    assert_eq!(h.publisher.count(), 2);
}

#[tokio::test(start_paused = true)]
async fn cached_price_is_idempotent_until_ttl() {
    let provider = ScriptedProvider::new().with_price("bitcoin", 65000.5);
    let h = Harness::new(provider, RecordingPublisher::new(), true);
    h.build_directory().await;

    let (status, first) = h.get("/price/BTC").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        first,
        json!({"symbol": "BTC", "price": 65000.5, "source": "fallback"})
    );

    for _ in 0..3 {
        let (status, body) = h.get("/price/btc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"symbol": "BTC", "price": 65000.5, "source": "cache"})
        );
    }
    assert_eq!(h.provider.price_calls().len(), 1);
    assert_eq!(h.publisher.count(), 0);

    // 60초 TTL 만료 후에는 다시 제공자 조회
    tokio::time::advance(Duration::from_secs(60)).await;
    let (_, body) = h.get("/price/BTC").await;
    assert_eq!(body["source"], "fallback");
    assert_eq!(h.provider.price_calls().len(), 2);
}

#[tokio::test]
async fn health_endpoints_are_mounted() {
    let h = Harness::new(ScriptedProvider::new(), RecordingPublisher::new(), false);
    h.build_directory().await;

    let (status, body) = h.get("/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["components"]["symbol_directory"]["message"], "2 symbols");
}
