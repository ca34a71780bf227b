//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭, 가격 조회 파이프라인 메트릭을 수집하고 `/metrics` 엔드포인트로 노출합니다.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Prometheus 메트릭 레코더를 설정하고 핸들을 반환합니다.
///
/// # 반환값
///
/// `/metrics` 엔드포인트에서 메트릭을 렌더링하기 위한 `PrometheusHandle`.
/// 레코더가 이미 설치되어 있으면 에러를 반환합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        // HTTP 요청 지속 시간 히스토그램 버킷 설정
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()
}

// ============================================================================
// HTTP 메트릭 헬퍼 함수
// ============================================================================

/// HTTP 요청 카운터 증가.
pub fn record_http_request(method: &str, path: &str) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string())
        .increment(1);
}

/// HTTP 응답 카운터 증가.
pub fn record_http_response(method: &str, path: &str, status: u16) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// HTTP 요청 지속 시간 기록.
pub fn record_http_duration(method: &str, path: &str, duration_secs: f64) {
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

// ============================================================================
// 파이프라인 메트릭 헬퍼 함수
// ============================================================================

/// 가격 요청 결과 카운터 증가.
///
/// outcome: cache, fallback, pending, unsupported, symbols_unavailable, service_unavailable
pub fn record_price_request(outcome: &str) {
    counter!("price_requests_total", "outcome" => outcome.to_string()).increment(1);
}

/// 심볼 디렉터리 갱신 결과 카운터 증가.
pub fn record_directory_refresh(result: &str) {
    counter!("symbol_directory_refresh_total", "result" => result.to_string()).increment(1);
}

/// 심볼 디렉터리 크기 설정.
pub fn set_directory_size(count: usize) {
    gauge!("symbol_directory_size").set(count as f64);
}

/// 갱신 태스크 발행 결과 카운터 증가.
pub fn record_task_published(result: &str) {
    counter!("refresh_tasks_published_total", "result" => result.to_string()).increment(1);
}

// ============================================================================
// 경로 정규화 유틸리티
// ============================================================================

/// 경로에서 동적 파라미터를 정규화합니다.
///
/// 예: `/price/BTC` → `/price/:symbol`, `/items/12345` → `/items/:id`
pub fn normalize_path(path: &str) -> String {
    let mut previous = "";
    let normalized: Vec<String> = path
        .split('/')
        .map(|segment| {
            let is_numeric = !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit());

            let replaced = if previous == "price" && !segment.is_empty() {
                ":symbol".to_string()
            } else if is_numeric {
                ":id".to_string()
            } else {
                segment.to_string()
            };
            previous = segment;
            replaced
        })
        .collect();
    normalized.join("/")
}
