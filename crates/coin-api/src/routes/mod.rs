//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/price/{symbol}` - 심볼 USD 가격 조회

pub mod health;
pub mod price;

pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use price::{price_router, PendingResponse};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/price", price_router())
}
