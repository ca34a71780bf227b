//! 라우트 핸들러가 사용하는 서비스 계층.

pub mod price;

pub use price::{resolve_price, PriceOutcome};
