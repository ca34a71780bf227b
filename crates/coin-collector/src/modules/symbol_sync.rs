//! 심볼 디렉터리 동기화 모듈.

use coin_core::DirectoryConfig;
use coin_data::{MarketDataProvider, SymbolDirectory};

use crate::{CollectionStats, Result};

/// 순위 목록으로 심볼 디렉터리를 한 번 재구성합니다.
///
/// 실패한 페이지는 `skipped`, 저장된 고유 심볼 수는 `success`로 집계됩니다.
pub async fn sync_symbols(
    directory: &SymbolDirectory,
    provider: &dyn MarketDataProvider,
    config: &DirectoryConfig,
) -> Result<CollectionStats> {
    tracing::info!(
        provider = provider.name(),
        pages = config.pages,
        per_page = config.per_page,
        "심볼 동기화 시작"
    );

    let refresh = directory
        .refresh_with_stats(provider, config.pages, config.per_page)
        .await?;
    refresh.log_summary();

    if refresh.symbols == 0 {
        tracing::warn!("No symbols fetched, directory stored empty");
    }

    Ok(CollectionStats {
        total: refresh.pages_requested as usize,
        success: refresh.symbols,
        errors: 0,
        skipped: refresh.pages_skipped as usize,
        elapsed: refresh.elapsed,
    })
}
