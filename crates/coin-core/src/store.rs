//! key-value 저장소 추상화.
//!
//! 심볼 디렉터리와 가격 캐시는 프로세스 전역 상태가 아니라 이 trait을 통해
//! 주입된 저장소를 사용합니다. 운영 환경에서는 Redis, 테스트에서는 인메모리
//! 구현을 사용합니다.
//!
//! 각 키의 읽기/쓰기는 개별적으로 원자적이지만 여러 키에 걸친 트랜잭션은
//! 제공하지 않습니다.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::CoinResult;

/// 문자열 값을 저장하는 key-value 저장소.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// 값을 조회합니다. 만료되었거나 없는 키는 `None`.
    async fn get(&self, key: &str) -> CoinResult<Option<String>>;

    /// 값을 저장합니다. `ttl`이 `None`이면 만료되지 않습니다.
    ///
    /// 기존 값은 통째로 교체됩니다.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CoinResult<()>;

    /// 기존 키에 만료 시간을 설정합니다. 키가 없으면 `false`.
    async fn expire(&self, key: &str, ttl: Duration) -> CoinResult<bool>;

    /// 키를 삭제합니다. 삭제된 키가 있으면 `true`.
    async fn delete(&self, key: &str) -> CoinResult<bool>;

    /// 저장소 연결 상태를 확인합니다.
    async fn ping(&self) -> CoinResult<bool>;
}
