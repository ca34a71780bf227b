//! key-value 저장소 구현.

pub mod memory;
pub mod redis;

pub use memory::{MemoryStore, StoreOps};
pub use self::redis::RedisStore;
