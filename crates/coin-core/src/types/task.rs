//! 가격 갱신 태스크 메시지.

use serde::{Deserialize, Serialize};

use super::Ticker;

/// 갱신 태스크가 적재되는 durable 큐 이름.
pub const REFRESH_QUEUE: &str = "crypto.tasks";

/// 워커에게 심볼 가격의 조회·캐싱을 요청하는 메시지.
///
/// 큐는 중복을 제거하지 않으므로 같은 심볼이 여러 번 전달될 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTask {
    pub symbol: Ticker,
}

impl RefreshTask {
    pub fn new(symbol: Ticker) -> Self {
        Self { symbol }
    }

    /// 큐에 발행할 JSON 본문.
    pub fn to_payload(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// 큐에서 받은 JSON 본문을 해석합니다. 심볼은 대문자로 정규화됩니다.
    pub fn from_payload(payload: &[u8]) -> serde_json::Result<Self> {
        let task: RefreshTask = serde_json::from_slice(payload)?;
        Ok(Self::new(Ticker::new(task.symbol.as_str())))
    }
}
