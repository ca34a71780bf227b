//! # Coin Core
//!
//! 암호화폐 시세 조회 서비스의 핵심 타입과 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 모든 서비스 크레이트에서 공유하는 기본 요소를 제공합니다:
//! - 설정 관리 (config + 환경변수)
//! - 에러 타입
//! - 로깅 인프라
//! - key-value 저장소 추상화 (`KeyValueStore`)
//! - 심볼, 가격 출처, 갱신 태스크 등 도메인 타입

pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use store::KeyValueStore;
pub use types::*;
