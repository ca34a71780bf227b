//! 수집기 설정 모듈.
//!
//! 공통 설정(`AppConfig`)에 워커 전용 설정을 더합니다.

use coin_core::AppConfig;
use std::path::Path;

use crate::Result;

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 공통 설정 (Redis, 브로커, 제공자, 디렉터리, 가격)
    pub app: AppConfig,
    /// 워커 설정
    pub worker: WorkerConfig,
}

/// 갱신 워커 설정
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// ack 대기 상태로 받을 최대 메시지 수
    pub prefetch: u16,
    /// AMQP consumer tag
    pub consumer_tag: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            prefetch: 10,
            consumer_tag: "coin-collector".to_string(),
        }
    }
}

impl WorkerConfig {
    /// 환경변수에서 워커 설정 로드
    ///
    /// * `COLLECTOR_PREFETCH` - prefetch 수 (기본: 10)
    /// * `COLLECTOR_CONSUMER_TAG` - consumer tag (기본: "coin-collector")
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let prefetch = std::env::var("COLLECTOR_PREFETCH")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&v: &u16| v > 0)
            .unwrap_or(defaults.prefetch);

        let consumer_tag = std::env::var("COLLECTOR_CONSUMER_TAG")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.consumer_tag);

        Self {
            prefetch,
            consumer_tag,
        }
    }
}

impl CollectorConfig {
    /// 설정 파일과 환경변수에서 설정 로드
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        dotenvy::dotenv().ok();

        let app = AppConfig::load(path)?;
        let worker = WorkerConfig::from_env();

        Ok(Self { app, worker })
    }
}
