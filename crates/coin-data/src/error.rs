//! 데이터 모듈 오류 타입.

use coin_core::CoinError;
use thiserror::Error;

/// 데이터 계층 오류.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// 캐시/저장소 오류
    #[error("Cache error: {0}")]
    CacheError(String),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 외부 제공자 요청 실패 (전송 오류, 타임아웃)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 외부 제공자의 비정상 상태 코드
    #[error("Upstream returned status {status}: {url}")]
    UpstreamStatus { status: u16, url: String },

    /// 응답 형식 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 브로커 연결/발행 오류
    #[error("Broker error: {0}")]
    BrokerError(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<redis::RedisError> for DataError {
    fn from(err: redis::RedisError) -> Self {
        DataError::CacheError(err.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DataError::ParseError(err.to_string())
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

impl From<lapin::Error> for DataError {
    fn from(err: lapin::Error) -> Self {
        DataError::BrokerError(err.to_string())
    }
}

impl From<CoinError> for DataError {
    fn from(err: CoinError) -> Self {
        match err {
            CoinError::Store(msg) => DataError::CacheError(msg),
            CoinError::Serialization(msg) => DataError::SerializationError(msg),
            CoinError::Upstream(msg) => DataError::FetchError(msg),
            CoinError::Malformed(msg) => DataError::ParseError(msg),
            CoinError::Broker(msg) => DataError::BrokerError(msg),
            CoinError::Config(msg) => DataError::ConfigError(msg),
        }
    }
}

impl From<DataError> for CoinError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::CacheError(msg) => CoinError::Store(msg),
            DataError::SerializationError(msg) => CoinError::Serialization(msg),
            DataError::FetchError(msg) => CoinError::Upstream(msg),
            DataError::UpstreamStatus { status, url } => {
                CoinError::Upstream(format!("status {}: {}", status, url))
            }
            DataError::ParseError(msg) => CoinError::Malformed(msg),
            DataError::BrokerError(msg) => CoinError::Broker(msg),
            DataError::ConfigError(msg) => CoinError::Config(msg),
        }
    }
}

impl DataError {
    /// 외부 제공자 측 실패(연결 불가, 비정상 상태, 잘못된 응답)인지 확인합니다.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            DataError::FetchError(_) | DataError::UpstreamStatus { .. } | DataError::ParseError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
