//! Standalone collector CLI.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use coin_collector::modules::{self, RefreshWorker};
use coin_collector::CollectorConfig;
use coin_core::{init_logging, LogConfig, LogFormat, Ticker, DEFAULT_CONFIG_PATH};
use coin_data::{
    AmqpConsumer, CoinGeckoClient, FallbackFetcher, PriceCache, RedisStore, SymbolDirectory,
};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "coin-collector")]
#[command(about = "Coin price symbol sync and refresh worker", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 설정 파일 경로
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// 로그 레벨 (설정 파일 값보다 우선)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 심볼 디렉터리 재구성 (시가총액 순위 목록)
    SyncSymbols,

    /// 갱신 태스크 큐 소비 (Ctrl+C로 종료)
    Worker {
        /// prefetch 수 (COLLECTOR_PREFETCH보다 우선)
        #[arg(long)]
        prefetch: Option<u16>,
    },

    /// 단일 심볼 가격 갱신
    RefreshPrice {
        /// 심볼 (예: BTC)
        symbol: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CollectorConfig::load(&cli.config)?;

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.app.logging.level.clone());
    let format: LogFormat = config.app.logging.format.parse().unwrap_or_default();
    init_logging(LogConfig::new(level).with_format(format))
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    tracing::info!("Coin Collector 시작");

    let store = Arc::new(RedisStore::connect(&config.app.redis.url).await?);
    tracing::info!("Redis 연결 성공");

    let provider = Arc::new(CoinGeckoClient::new(&config.app.provider)?);
    let directory = SymbolDirectory::new(store.clone(), config.app.directory.ttl());
    let cache = PriceCache::new(store, config.app.price.ttl());
    let worker = RefreshWorker::new(
        directory.clone(),
        cache,
        FallbackFetcher::new(provider.clone()),
    );

    match cli.command {
        Commands::SyncSymbols => {
            let stats =
                modules::sync_symbols(&directory, provider.as_ref(), &config.app.directory).await?;
            stats.log_summary("심볼 동기화");
        }
        Commands::Worker { prefetch } => {
            let prefetch = prefetch.unwrap_or(config.worker.prefetch);
            let consumer =
                AmqpConsumer::connect(&config.app.broker, &config.worker.consumer_tag, prefetch)
                    .await?;

            let shutdown_token = CancellationToken::new();
            let signal_token = shutdown_token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    signal_token.cancel();
                }
            });

            let stats = worker.run(consumer, shutdown_token).await?;
            stats.log_summary("가격 갱신 워커");
        }
        Commands::RefreshPrice { symbol } => {
            let symbol = Ticker::new(symbol);
            let outcome = worker.refresh(&symbol).await?;
            tracing::info!(%symbol, ?outcome, "가격 갱신 결과");
        }
    }

    tracing::info!("Coin Collector 종료");
    Ok(())
}
