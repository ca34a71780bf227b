//! 수집 모듈.

pub mod refresh_worker;
pub mod symbol_sync;

pub use refresh_worker::{RefreshWorker, TaskOutcome};
pub use symbol_sync::sync_symbols;
