//! 가격 조회 결과 타입.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Ticker;

/// 가격을 얻은 경로.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// 가격 캐시 적중
    Cache,
    /// 제공자 직접 조회 (fallback 모드)
    Fallback,
}

impl PriceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSource::Cache => "cache",
            PriceSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// USD 기준 가격 시세.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// 티커
    pub symbol: Ticker,
    /// USD 가격
    pub price: f64,
    /// 가격 출처
    pub source: PriceSource,
}
