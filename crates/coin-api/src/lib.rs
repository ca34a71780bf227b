//! 암호화폐 가격 조회 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 `GET /price/{symbol}` 엔드포인트
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//! - 심볼 디렉터리 백그라운드 갱신
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`services`]: 가격 조회 파이프라인
//! - [`routes`]: REST API 엔드포인트
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`tasks`]: 백그라운드 태스크

pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod tasks;

pub use error::{ApiErrorResponse, ApiResult};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use routes::*;
pub use services::{resolve_price, PriceOutcome};
pub use state::AppState;
pub use tasks::{start_symbol_refresh, SymbolRefreshConfig};

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
