//! 티커 심볼 정의.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 정규화된(대문자) 암호화폐 티커.
///
/// 예: "btc", " Btc " → "BTC". 디렉터리 저장과 조회 모두 이 형식을 사용하므로
/// 심볼 비교는 대소문자를 구분하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// 입력 문자열을 정규화하여 티커를 생성합니다.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_uppercase())
    }

    /// 정규화된 문자열.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 빈 티커 여부.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_normalization() {
        assert_eq!(Ticker::new("btc").as_str(), "BTC");
        assert_eq!(Ticker::new(" eTh ").as_str(), "ETH");
        assert_eq!(Ticker::from("BTC"), Ticker::from("btc".to_string()));
    }

    #[test]
    fn test_ticker_serializes_as_plain_string() {
        let json = serde_json::to_string(&Ticker::new("sol")).unwrap();
        assert_eq!(json, r#""SOL""#);
    }
}
