//! 백그라운드 태스크.

pub mod symbol_refresh;

pub use symbol_refresh::{run_refresh, start_symbol_refresh, SymbolRefreshConfig};
