//! 가격 갱신 워커.
//!
//! `crypto.tasks` 큐의 `{"symbol": ...}` 메시지를 받아 제공자에서 가격을 조회하고
//! 가격 캐시에 기록합니다. 조회에 실패하면 아무것도 기록하지 않습니다.
//!
//! ack 정책:
//! - 처리 완료, 가격 없음, 지원하지 않는 심볼, 잘못된 메시지 → ack
//! - 일시적 장애(저장소 등) → 첫 전달이면 requeue, 재전달이면 버림
//!
//! ack/reject 자체가 실패하면 채널을 더 쓸 수 없으므로 소비를 멈추고 연결을 닫습니다.

use coin_core::{RefreshTask, Ticker};
use coin_data::{Acknowledge, FallbackFetcher, PriceCache, SymbolDirectory, TaskConsumer};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{CollectionStats, Result};

/// 태스크 한 건의 처리 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// 가격을 캐시에 기록함
    Cached(f64),
    /// 제공자에서 가격을 얻지 못함 (캐시 변경 없음)
    NoPrice,
    /// 디렉터리에 없는 심볼
    UnknownSymbol,
    /// 디렉터리가 아직 구성되지 않음
    DirectoryMissing,
    /// 해석할 수 없는 메시지
    Malformed,
}

/// 디렉터리 → 제공자 → 캐시 순으로 가격을 갱신합니다.
#[derive(Clone)]
pub struct RefreshWorker {
    directory: SymbolDirectory,
    cache: PriceCache,
    fetcher: FallbackFetcher,
}

impl RefreshWorker {
    pub fn new(directory: SymbolDirectory, cache: PriceCache, fetcher: FallbackFetcher) -> Self {
        Self {
            directory,
            cache,
            fetcher,
        }
    }

    /// 심볼 하나의 가격을 갱신합니다.
    ///
    /// 저장소 장애만 에러로 반환합니다.
    pub async fn refresh(&self, symbol: &Ticker) -> Result<TaskOutcome> {
        let Some(directory) = self.directory.load().await? else {
            tracing::warn!(%symbol, "Symbol directory missing, dropping refresh task");
            return Ok(TaskOutcome::DirectoryMissing);
        };

        if !directory.contains(symbol.as_str()) {
            tracing::warn!(%symbol, "Refresh task for unknown symbol");
            return Ok(TaskOutcome::UnknownSymbol);
        }

        match self.fetcher.fetch(symbol, &directory).await {
            Some(price) => {
                self.cache.set(symbol, price).await?;
                tracing::info!(%symbol, price, "Price refreshed");
                Ok(TaskOutcome::Cached(price))
            }
            None => Ok(TaskOutcome::NoPrice),
        }
    }

    /// 큐 메시지 본문을 처리합니다.
    pub async fn handle_payload(&self, payload: &[u8]) -> Result<TaskOutcome> {
        match RefreshTask::from_payload(payload) {
            Ok(task) if !task.symbol.is_empty() => self.refresh(&task.symbol).await,
            Ok(_) => {
                tracing::warn!("Refresh task with empty symbol");
                Ok(TaskOutcome::Malformed)
            }
            Err(e) => {
                tracing::warn!(error = %e, body = %String::from_utf8_lossy(payload), "Malformed refresh task");
                Ok(TaskOutcome::Malformed)
            }
        }
    }

    /// 메시지 하나를 처리하고 ack/reject 후 통계에 반영합니다.
    ///
    /// ack/reject 실패만 에러로 반환합니다.
    async fn process<D: Acknowledge>(
        &self,
        delivery: &D,
        stats: &mut CollectionStats,
    ) -> Result<()> {
        stats.total += 1;

        match self.handle_payload(delivery.payload()).await {
            Ok(outcome) => {
                match outcome {
                    TaskOutcome::Cached(_) => stats.success += 1,
                    _ => stats.skipped += 1,
                }
                delivery.ack().await?;
            }
            Err(e) => {
                stats.errors += 1;
                let requeue = e.is_retryable() && !delivery.redelivered();
                tracing::error!(error = %e, requeue, "Refresh task failed");
                delivery.reject(requeue).await?;
            }
        }
        Ok(())
    }

    /// 종료 시그널을 받거나, 구독이 끝나거나, ack가 불가능해질 때까지 큐를 소비합니다.
    pub async fn run<C: TaskConsumer>(
        &self,
        mut consumer: C,
        shutdown_token: CancellationToken,
    ) -> Result<CollectionStats> {
        let start = Instant::now();
        let mut stats = CollectionStats::new();

        tracing::info!("갱신 워커 시작");

        loop {
            tokio::select! {
                delivery = consumer.recv() => {
                    match delivery {
                        Some(Ok(delivery)) => {
                            if let Err(e) = self.process(&delivery, &mut stats).await {
                                tracing::error!(error = %e, "Failed to settle refresh task, stopping worker");
                                break;
                            }
                        }
                        Some(Err(e)) => {
                            stats.errors += 1;
                            tracing::error!(error = %e, "Failed to receive refresh task");
                        }
                        None => {
                            tracing::warn!("Consumer stream closed");
                            break;
                        }
                    }
                }
                _ = shutdown_token.cancelled() => {
                    tracing::info!("종료 신호 수신, 워커 종료 중...");
                    break;
                }
            }
        }

        if let Err(e) = consumer.close().await {
            tracing::warn!(error = %e, "Failed to close broker connection");
        }

        stats.elapsed = start.elapsed();
        Ok(stats)
    }
}
