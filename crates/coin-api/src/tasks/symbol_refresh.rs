//! 심볼 디렉터리 백그라운드 갱신.
//!
//! 서버 실행 중 주기적으로(기본 12시간) 시가총액 순위 목록을 받아 디렉터리를
//! 통째로 교체합니다. 갱신 중에도 요청은 이전 디렉터리를 그대로 읽습니다.
//! 갱신 주기는 디렉터리 TTL(24시간)보다 짧아야 만료 전에 새 목록이 기록됩니다.

use std::sync::Arc;
use std::time::Duration;

use coin_core::DirectoryConfig;
use coin_data::{MarketDataProvider, RefreshStats, SymbolDirectory};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::metrics::{record_directory_refresh, set_directory_size};

/// 디렉터리 갱신 설정.
#[derive(Debug, Clone)]
pub struct SymbolRefreshConfig {
    /// 조회할 페이지 수 (기본: 4)
    pub pages: u32,
    /// 페이지당 항목 수 (기본: 250)
    pub per_page: u32,
    /// 갱신 주기 (기본: 12시간)
    pub interval: Duration,
    /// 시작 직후 한 번 갱신 (기본: true)
    pub run_on_startup: bool,
}

impl Default for SymbolRefreshConfig {
    fn default() -> Self {
        Self::from(&DirectoryConfig::default())
    }
}

impl From<&DirectoryConfig> for SymbolRefreshConfig {
    fn from(config: &DirectoryConfig) -> Self {
        Self {
            pages: config.pages,
            per_page: config.per_page,
            interval: config.refresh_interval(),
            run_on_startup: config.refresh_on_startup,
        }
    }
}

/// 디렉터리를 한 번 갱신하고 메트릭을 기록합니다.
pub async fn run_refresh(
    directory: &SymbolDirectory,
    provider: &dyn MarketDataProvider,
    config: &SymbolRefreshConfig,
) -> coin_data::Result<RefreshStats> {
    match directory
        .refresh_with_stats(provider, config.pages, config.per_page)
        .await
    {
        Ok(stats) => {
            let result = if stats.pages_skipped == 0 { "ok" } else { "partial" };
            record_directory_refresh(result);
            set_directory_size(stats.symbols);
            stats.log_summary();
            Ok(stats)
        }
        Err(e) => {
            record_directory_refresh("error");
            Err(e)
        }
    }
}

/// 디렉터리 백그라운드 갱신 시작.
///
/// # Arguments
/// * `directory` - 갱신할 심볼 디렉터리
/// * `provider` - 순위 목록 제공자
/// * `config` - 갱신 설정
/// * `shutdown_token` - 종료 시그널 토큰
pub fn start_symbol_refresh(
    directory: SymbolDirectory,
    provider: Arc<dyn MarketDataProvider>,
    config: SymbolRefreshConfig,
    shutdown_token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_secs = config.interval.as_secs(),
            pages = config.pages,
            per_page = config.per_page,
            run_on_startup = config.run_on_startup,
            "Symbol directory refresher started"
        );

        let mut refresh_interval = interval(config.interval);
        refresh_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        if !config.run_on_startup {
            // 첫 tick은 즉시 완료되므로 건너뜀
            refresh_interval.tick().await;
        }

        loop {
            tokio::select! {
                _ = refresh_interval.tick() => {
                    if let Err(e) = run_refresh(&directory, provider.as_ref(), &config).await {
                        error!(error = %e, "Symbol directory refresh failed");
                    }
                }
                _ = shutdown_token.cancelled() => {
                    info!("Symbol directory refresher: shutdown signal received");
                    break;
                }
            }
        }

        info!("Symbol directory refresher stopped");
    })
}
