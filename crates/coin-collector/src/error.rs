//! 에러 타입 정의.

use coin_core::CoinError;
use coin_data::DataError;
use thiserror::Error;

/// Collector 에러 타입
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// 저장소, 제공자, 브로커 에러
    #[error(transparent)]
    Data(#[from] DataError),
}

impl From<CoinError> for CollectorError {
    fn from(err: CoinError) -> Self {
        match err {
            CoinError::Config(msg) => Self::Config(msg),
            other => Self::Data(other.into()),
        }
    }
}

impl CollectorError {
    /// 다시 시도하면 성공할 수 있는 일시적 장애인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Config(_) => false,
            Self::Data(e) => CoinError::from(e.clone()).is_retryable(),
        }
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_are_mapped() {
        let err: CollectorError = CoinError::Config("bad".into()).into();
        assert!(matches!(err, CollectorError::Config(_)));

        let err: CollectorError = CoinError::Store("down".into()).into();
        assert!(matches!(err, CollectorError::Data(DataError::CacheError(_))));
        assert_eq!(err.to_string(), "Cache error: down");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(CollectorError::from(DataError::CacheError("reset".into())).is_retryable());
        assert!(CollectorError::from(DataError::BrokerError("refused".into())).is_retryable());
        assert!(!CollectorError::from(DataError::SerializationError("eof".into())).is_retryable());
        assert!(!CollectorError::Config("bad".into()).is_retryable());
    }
}
