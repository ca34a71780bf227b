//! CoinGecko REST 클라이언트.
//!
//! - `GET /coins/markets` : 시가총액 순위 목록 (심볼 디렉터리 구성용)
//! - `GET /simple/price`  : 제공자 ID별 USD 가격

use async_trait::async_trait;
use coin_core::ProviderConfig;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{ListingEntry, MarketDataProvider};
use crate::error::{DataError, Result};

const API_KEY_HEADER: &str = "x-cg-api-key";

/// CoinGecko 기반 시세 제공자.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    /// 설정으로부터 클라이언트를 생성합니다.
    ///
    /// 모든 요청에 `config.timeout_secs` 타임아웃이 적용됩니다.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DataError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET 요청 후 성공 상태의 본문을 JSON으로 해석합니다.
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let mut request = self.client.get(url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| DataError::ParseError(e.to_string()))
    }
}

/// `/simple/price` 응답에서 `{id: {"usd": price}}`를 꺼냅니다.
fn extract_usd_price(data: &Value, provider_id: &str) -> Option<f64> {
    data.get(provider_id)?.get("usd")?.as_f64()
}

#[async_trait]
impl MarketDataProvider for CoinGeckoClient {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    #[instrument(skip(self))]
    async fn fetch_listings_page(&self, page: u32, per_page: u32) -> Result<Vec<ListingEntry>> {
        let url = self.url("/coins/markets");
        let query = [
            ("vs_currency", "usd".to_string()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
            ("sparkline", "false".to_string()),
        ];

        let data = self.get_json(&url, &query).await?;
        let entries: Vec<ListingEntry> =
            serde_json::from_value(data).map_err(|e| DataError::ParseError(e.to_string()))?;

        debug!(page, count = entries.len(), "Listings page fetched");
        Ok(entries)
    }

    #[instrument(skip(self))]
    async fn fetch_usd_price(&self, provider_id: &str) -> Result<Option<f64>> {
        let url = self.url("/simple/price");
        let query = [
            ("ids", provider_id.to_string()),
            ("vs_currencies", "usd".to_string()),
        ];

        let data = self.get_json(&url, &query).await?;
        Ok(extract_usd_price(&data, provider_id))
    }
}
