//! 테스트용 provider/publisher/consumer 구현.
//!
//! 네트워크나 브로커 없이 파이프라인을 검증할 수 있도록 응답을 미리 지정하고
//! 호출 내역을 기록합니다.

use async_trait::async_trait;
use coin_core::RefreshTask;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{DataError, Result};
use crate::provider::{ListingEntry, MarketDataProvider};
use crate::queue::{Acknowledge, TaskConsumer, TaskPublisher};

/// 미리 지정한 응답을 돌려주는 시세 제공자.
///
/// - 목록 페이지: `Err(status)`는 해당 상태 코드의 실패
/// - 가격: 지정하지 않은 ID는 연결 실패로 응답
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    pages: Vec<std::result::Result<Vec<ListingEntry>, u16>>,
    prices: HashMap<String, Option<f64>>,
    listing_delay: Duration,
    listing_calls: Mutex<Vec<u32>>,
    price_calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1페이지부터 순서대로 응답할 목록 페이지.
    pub fn with_pages(mut self, pages: Vec<std::result::Result<Vec<ListingEntry>, u16>>) -> Self {
        self.pages = pages;
        self
    }

    /// 목록 페이지마다 응답 전에 기다릴 시간.
    pub fn with_listing_delay(mut self, delay: Duration) -> Self {
        self.listing_delay = delay;
        self
    }

    /// 제공자 ID의 USD 가격.
    pub fn with_price(mut self, provider_id: &str, price: f64) -> Self {
        self.prices.insert(provider_id.to_string(), Some(price));
        self
    }

    /// 응답은 성공했지만 가격 키가 없는 경우.
    pub fn with_missing_price(mut self, provider_id: &str) -> Self {
        self.prices.insert(provider_id.to_string(), None);
        self
    }

    /// 요청된 목록 페이지 번호들.
    pub fn listing_calls(&self) -> Vec<u32> {
        self.listing_calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// 가격이 요청된 제공자 ID들.
    pub fn price_calls(&self) -> Vec<String> {
        self.price_calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MarketDataProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn fetch_listings_page(&self, page: u32, _per_page: u32) -> Result<Vec<ListingEntry>> {
        if let Ok(mut calls) = self.listing_calls.lock() {
            calls.push(page);
        }
        if !self.listing_delay.is_zero() {
            tokio::time::sleep(self.listing_delay).await;
        }
        let scripted = page
            .checked_sub(1)
            .and_then(|index| self.pages.get(index as usize));
        match scripted {
            Some(Ok(entries)) => Ok(entries.clone()),
            Some(Err(status)) => Err(DataError::UpstreamStatus {
                status: *status,
                url: format!("scripted://coins/markets?page={}", page),
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_usd_price(&self, provider_id: &str) -> Result<Option<f64>> {
        if let Ok(mut calls) = self.price_calls.lock() {
            calls.push(provider_id.to_string());
        }
        match self.prices.get(provider_id) {
            Some(price) => Ok(*price),
            None => Err(DataError::FetchError(format!(
                "no scripted price for {}",
                provider_id
            ))),
        }
    }
}

/// 발행된 태스크를 기록하는 publisher.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<RefreshTask>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 브로커에 연결할 수 없는 상황을 흉내냅니다.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn published(&self) -> Vec<RefreshTask> {
        self.published.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.published().len()
    }
}

#[async_trait]
impl TaskPublisher for RecordingPublisher {
    async fn publish(&self, task: &RefreshTask) -> Result<()> {
        if self.fail {
            return Err(DataError::BrokerError("connection refused".to_string()));
        }
        if let Ok(mut published) = self.published.lock() {
            published.push(task.clone());
        }
        Ok(())
    }
}

/// 메시지 정리 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Acked,
    Rejected { requeue: bool },
}

/// `ScriptedConsumer`의 ack/reject 내역과 종료 여부.
#[derive(Debug, Clone, Default)]
pub struct ConsumerLog {
    settled: Arc<Mutex<Vec<Settled>>>,
    closed: Arc<AtomicBool>,
}

impl ConsumerLog {
    pub fn settled(&self) -> Vec<Settled> {
        self.settled.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn record(&self, settled: Settled) {
        if let Ok(mut log) = self.settled.lock() {
            log.push(settled);
        }
    }
}

/// `ScriptedConsumer`가 돌려주는 메시지.
#[derive(Debug)]
pub struct ScriptedDelivery {
    payload: Vec<u8>,
    redelivered: bool,
    broken_channel: bool,
    log: ConsumerLog,
}

#[async_trait]
impl Acknowledge for ScriptedDelivery {
    fn payload(&self) -> &[u8] {
        &self.payload
    }

    fn redelivered(&self) -> bool {
        self.redelivered
    }

    async fn ack(&self) -> Result<()> {
        if self.broken_channel {
            return Err(DataError::BrokerError("channel closed".to_string()));
        }
        self.log.record(Settled::Acked);
        Ok(())
    }

    async fn reject(&self, requeue: bool) -> Result<()> {
        if self.broken_channel {
            return Err(DataError::BrokerError("channel closed".to_string()));
        }
        self.log.record(Settled::Rejected { requeue });
        Ok(())
    }
}

/// 미리 지정한 메시지를 차례로 돌려주고, 다 소진하면 구독 종료(`None`)를 알리는 소비자.
#[derive(Debug, Default)]
pub struct ScriptedConsumer {
    deliveries: VecDeque<ScriptedDelivery>,
    log: ConsumerLog,
}

impl ScriptedConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(self, payload: &[u8], redelivered: bool) -> Self {
        self.push(payload, redelivered, false)
    }

    /// ack/reject가 실패하는(채널이 닫힌) 메시지.
    pub fn with_unsettleable_message(self, payload: &[u8]) -> Self {
        self.push(payload, false, true)
    }

    /// 소비자를 넘긴 뒤에도 내역을 확인할 수 있는 핸들.
    pub fn log(&self) -> ConsumerLog {
        self.log.clone()
    }

    fn push(mut self, payload: &[u8], redelivered: bool, broken_channel: bool) -> Self {
        self.deliveries.push_back(ScriptedDelivery {
            payload: payload.to_vec(),
            redelivered,
            broken_channel,
            log: self.log.clone(),
        });
        self
    }
}

#[async_trait]
impl TaskConsumer for ScriptedConsumer {
    type Delivery = ScriptedDelivery;

    async fn recv(&mut self) -> Option<Result<ScriptedDelivery>> {
        self.deliveries.pop_front().map(Ok)
    }

    async fn close(self) -> Result<()> {
        self.log.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
