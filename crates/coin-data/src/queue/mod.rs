//! 가격 갱신 태스크 큐.
//!
//! 발행은 best-effort at-least-once입니다. 발행 확인 이후의 처리 결과는
//! 기다리지 않으며 큐는 중복을 제거하지 않습니다.

pub mod amqp;

use async_trait::async_trait;
use coin_core::RefreshTask;

use crate::error::Result;

pub use amqp::{AmqpConsumer, AmqpPublisher, TaskDelivery};

/// 갱신 태스크 발행자.
#[async_trait]
pub trait TaskPublisher: Send + Sync {
    /// 태스크를 큐에 발행합니다.
    ///
    /// 브로커에 연결할 수 없으면 `DataError::BrokerError`를 반환하며,
    /// 호출자는 이를 "일시적으로 가격을 제공할 수 없음"으로 처리해야 합니다.
    async fn publish(&self, task: &RefreshTask) -> Result<()>;
}

/// 큐에서 받은 메시지 한 건 (수동 ack).
#[async_trait]
pub trait Acknowledge: Send + Sync {
    /// 메시지 본문 (JSON)
    fn payload(&self) -> &[u8];

    /// 이전에 전달된 적이 있는 메시지인지 여부
    fn redelivered(&self) -> bool;

    /// 처리 완료 확인.
    async fn ack(&self) -> Result<()>;

    /// 처리 실패. `requeue`가 true면 큐로 되돌립니다.
    async fn reject(&self, requeue: bool) -> Result<()>;
}

/// 갱신 태스크 소비자.
#[async_trait]
pub trait TaskConsumer: Send {
    type Delivery: Acknowledge;

    /// 다음 메시지를 기다립니다. 구독이 끝나면 `None`.
    async fn recv(&mut self) -> Option<Result<Self::Delivery>>;

    /// 연결을 정상 종료합니다.
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}
