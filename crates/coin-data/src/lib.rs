//! # Coin Data
//!
//! 가격 조회 파이프라인의 데이터 계층입니다.
//!
//! ## 주요 기능
//!
//! - **저장소**: Redis(`RedisStore`), 인메모리(`MemoryStore`)
//! - **시세 제공자**: CoinGecko REST 클라이언트
//! - **심볼 디렉터리**: 시가총액 순위 기반 티커 → 제공자 ID 매핑
//! - **가격 캐시**: 심볼별 짧은 TTL 가격
//! - **Fallback 조회**: 제공자 직접 조회
//! - **태스크 큐**: AMQP 갱신 태스크 발행/소비

pub mod directory;
pub mod error;
pub mod fallback;
pub mod price_cache;
pub mod provider;
pub mod queue;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use directory::{RefreshStats, SymbolDirectory, SymbolMap, SYMBOL_MAP_KEY};
pub use error::{DataError, Result};
pub use fallback::FallbackFetcher;
pub use price_cache::{price_key, PriceCache, PRICE_KEY_PREFIX};
pub use provider::{CoinGeckoClient, ListingEntry, MarketDataProvider};
pub use queue::{
    Acknowledge, AmqpConsumer, AmqpPublisher, TaskConsumer, TaskDelivery, TaskPublisher,
};
pub use storage::{MemoryStore, RedisStore, StoreOps};
