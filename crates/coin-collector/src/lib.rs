//! API 서버와 독립적으로 실행되는 수집기.
//!
//! 이 crate는 다음 바이너리 기능을 제공합니다:
//! - 심볼 디렉터리 동기화 (일회성)
//! - 가격 갱신 워커 (`crypto.tasks` 큐 소비)
//! - 단일 심볼 가격 갱신

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::{CollectorConfig, WorkerConfig};
pub use error::{CollectorError, Result};
pub use stats::CollectionStats;
