//! API 에러 응답 타입.
//!
//! 모든 에러 응답은 `{"detail": "..."}` 형식입니다.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// 지원하지 않는 심볼.
pub const DETAIL_UNSUPPORTED: &str = "symbol not supported";
/// 심볼 디렉터리가 아직 구성되지 않았거나 만료됨.
pub const DETAIL_SYMBOLS_UNAVAILABLE: &str = "symbols temporarily unavailable";
/// 저장소 또는 브로커를 사용할 수 없음.
pub const DETAIL_SERVICE_UNAVAILABLE: &str = "service temporarily unavailable";

/// API 에러 응답.
///
/// ```json
/// { "detail": "symbol not supported" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 사람이 읽을 수 있는 에러 설명
    pub detail: String,
}

impl ApiErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// 상태 코드와 함께 핸들러 에러로 변환합니다.
    pub fn with_status(self, status: StatusCode) -> (StatusCode, Json<ApiErrorResponse>) {
        (status, Json(self))
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.detail)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
///
/// # Example
///
/// ```ignore
/// async fn handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<PriceQuote>> {
///     let quote = lookup(&state)
///         .await
///         .ok_or_else(|| ApiErrorResponse::new(DETAIL_UNSUPPORTED).with_status(StatusCode::BAD_REQUEST))?;
///     Ok(Json(quote))
/// }
/// ```
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let json = serde_json::to_string(&ApiErrorResponse::new(DETAIL_UNSUPPORTED)).unwrap();
        assert_eq!(json, r#"{"detail":"symbol not supported"}"#);
    }

    #[test]
    fn test_with_status() {
        let (status, Json(body)) =
            ApiErrorResponse::new(DETAIL_SERVICE_UNAVAILABLE).with_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.to_string(), "service temporarily unavailable");
    }
}
