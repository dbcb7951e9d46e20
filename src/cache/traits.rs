use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::Result;

/// Key-value store with field-hash values and per-key expiry.
#[async_trait]
pub trait HashStore: Send + Sync {
    /// All fields stored under `key`; an empty map when the key does not exist.
    ///
    /// An unreachable store is an `Err`, never an empty map.
    async fn read_hash(&self, key: &str) -> Result<HashMap<String, String>>;

    /// 写入所有字段并设置过期时间，必须作为一次原子提交
    async fn write_hash(&self, key: &str, fields: &[(&str, &str)], ttl_secs: u64) -> Result<()>;

    /// 获取 store 名称（用于日志）
    fn name(&self) -> &'static str;
}
