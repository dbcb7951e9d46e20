pub mod client;
pub mod redis_store;
pub mod traits;

pub use client::{CacheClient, KEY_PREFIX, cache_key};
pub use redis_store::RedisHashStore;
pub use traits::HashStore;
