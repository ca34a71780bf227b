//! 시세 조회 파이프라인의 에러 타입.
//!
//! 이 모듈은 모든 크레이트에서 공유하는 에러 분류를 정의합니다.
//! 파이프라인 내부 실패는 요청 경계에서 "가격 데이터 없음"으로 강등되므로
//! 어떤 변형도 프로세스를 종료시키지 않습니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum CoinError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// key-value 저장소 에러 (Redis 등)
    #[error("저장소 에러: {0}")]
    Store(String),

    /// 외부 제공자 연결 실패 또는 비정상 상태 코드
    #[error("외부 제공자 에러: {0}")]
    Upstream(String),

    /// 예상과 다른 응답 형식
    #[error("잘못된 응답 형식: {0}")]
    Malformed(String),

    /// 메시지 브로커 에러
    #[error("브로커 에러: {0}")]
    Broker(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 파이프라인 작업을 위한 Result 타입.
pub type CoinResult<T> = Result<T, CoinError>;

impl CoinError {
    /// 재시도 가능한(일시적인 인프라) 에러인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CoinError::Store(_) | CoinError::Upstream(_) | CoinError::Broker(_)
        )
    }
}

impl From<serde_json::Error> for CoinError {
    fn from(err: serde_json::Error) -> Self {
        CoinError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        assert!(CoinError::Upstream("timeout".to_string()).is_retryable());
        assert!(CoinError::Broker("connection refused".to_string()).is_retryable());
        assert!(CoinError::Store("connection reset".to_string()).is_retryable());
        assert!(!CoinError::Malformed("missing usd".to_string()).is_retryable());
        assert!(!CoinError::Config("bad".to_string()).is_retryable());
        assert!(!CoinError::Serialization("eof".to_string()).is_retryable());
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<f64>("not-json").unwrap_err();
        let coin_err: CoinError = err.into();
        assert!(matches!(coin_err, CoinError::Serialization(_)));
    }
}
