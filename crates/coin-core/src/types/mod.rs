//! 파이프라인 전반에서 사용되는 공통 타입.

mod price;
mod symbol;
mod task;

pub use price::*;
pub use symbol::*;
pub use task::*;
