//! 가격 조회 endpoint.
//!
//! `GET /price/{symbol}`
//!
//! | 상태 | 본문 |
//! |------|------|
//! | 200 | `{"symbol":"BTC","price":65000.5,"source":"cache"}` |
//! | 202 | `{"status":"pending","retry_after":3}` |
//! | 400 | `{"detail":"symbol not supported"}` |
//! | 503 | `{"detail":"symbols temporarily unavailable"}` 또는 `{"detail":"service temporarily unavailable"}` |

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{
    ApiErrorResponse, ApiResult, DETAIL_SERVICE_UNAVAILABLE, DETAIL_SYMBOLS_UNAVAILABLE,
    DETAIL_UNSUPPORTED,
};
use crate::services::{resolve_price, PriceOutcome};
use crate::state::AppState;

/// 가격이 아직 없을 때의 응답.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingResponse {
    /// 항상 "pending"
    pub status: String,
    /// 재시도 권장 시간 (초)
    pub retry_after: u64,
}

impl PendingResponse {
    pub fn new(retry_after: u64) -> Self {
        Self {
            status: "pending".to_string(),
            retry_after,
        }
    }
}

/// 심볼의 USD 가격 조회.
///
/// GET /price/{symbol}
pub async fn get_price(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Response> {
    match resolve_price(&state, &symbol).await {
        PriceOutcome::Quote(quote) => Ok(Json(quote).into_response()),
        PriceOutcome::Pending { retry_after } => {
            Ok((StatusCode::ACCEPTED, Json(PendingResponse::new(retry_after))).into_response())
        }
        PriceOutcome::Unsupported => {
            Err(ApiErrorResponse::new(DETAIL_UNSUPPORTED).with_status(StatusCode::BAD_REQUEST))
        }
        PriceOutcome::SymbolsUnavailable => Err(ApiErrorResponse::new(DETAIL_SYMBOLS_UNAVAILABLE)
            .with_status(StatusCode::SERVICE_UNAVAILABLE)),
        PriceOutcome::ServiceUnavailable => Err(ApiErrorResponse::new(DETAIL_SERVICE_UNAVAILABLE)
            .with_status(StatusCode::SERVICE_UNAVAILABLE)),
    }
}

/// 가격 라우터 생성.
pub fn price_router() -> Router<Arc<AppState>> {
    Router::new().route("/{symbol}", get(get_price))
}
