//! IP 记录缓存客户端
//!
//! Records live under `ipinfo:<ip_address>` as a flat hash of the four data fields
//! with a fixed TTL. Only complete records are ever written.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::redis_store::RedisHashStore;
use super::traits::HashStore;
use crate::config::RedisConfig;
use crate::deadline::Deadline;
use crate::errors::{IpInfoError, Result};
use crate::record::{FIELD_NAMES, IpRecord, Outcome};
use crate::utils::ip::parse_ip;

pub const KEY_PREFIX: &str = "ipinfo:";

pub fn cache_key(ip_address: &str) -> String {
    format!("{}{}", KEY_PREFIX, ip_address)
}

#[derive(Clone)]
pub struct CacheClient {
    store: Arc<dyn HashStore>,
    ttl_secs: u64,
}

impl CacheClient {
    pub fn new(store: Arc<dyn HashStore>, ttl_secs: u64) -> Result<Self> {
        if ttl_secs == 0 {
            return Err(IpInfoError::configuration(
                "Cache TTL must be greater than 0",
            ));
        }
        Ok(Self { store, ttl_secs })
    }

    pub fn from_config(config: &RedisConfig) -> Result<Self> {
        let store = RedisHashStore::new(&config.uri)?;
        Self::new(Arc::new(store), config.cache_ttl)
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Read the cached record for `ip_address`.
    ///
    /// Entries with a missing or empty field, or with values that no longer
    /// validate, read as `Absent` so the caller refetches and overwrites them.
    ///
    /// # Errors
    /// `Validation` for a malformed address (the store is not queried); `Cache`
    /// when the store cannot be reached.
    pub async fn get(&self, ip_address: &str, deadline: Deadline) -> Result<Outcome<IpRecord>> {
        parse_ip(ip_address)?;

        let key = cache_key(ip_address);
        let fields = deadline
            .run("Cache read", self.store.read_hash(&key))
            .await?;

        if fields.is_empty() {
            trace!("Cache miss: {}", key);
            return Ok(Outcome::Absent);
        }

        if let Some(missing) = FIELD_NAMES.iter().find(|name| !fields.contains_key(**name)) {
            warn!("Cache entry {} lacks field '{}', ignoring", key, missing);
            return Ok(Outcome::Absent);
        }

        let record = match IpRecord::from_hash_fields(ip_address, &fields) {
            Ok(record) => record,
            Err(e) => {
                warn!("Cache entry {} is invalid, ignoring: {}", key, e);
                return Ok(Outcome::Absent);
            }
        };

        if !record.is_complete() {
            debug!("Cache entry {} is incomplete, ignoring", key);
            return Ok(Outcome::Absent);
        }

        trace!("Cache hit: {}", key);
        Ok(Outcome::Found(record))
    }

    /// Cache `record` under `ip_address` with the configured TTL.
    ///
    /// `None` and incomplete records are a no-op: the store is not touched.
    ///
    /// # Errors
    /// `Validation` for a malformed address; `Cache` when the write fails.
    pub async fn put(
        &self,
        ip_address: &str,
        record: Option<&IpRecord>,
        deadline: Deadline,
    ) -> Result<()> {
        parse_ip(ip_address)?;

        let Some(record) = record else {
            return Ok(());
        };
        if !record.is_complete() {
            debug!("Not caching incomplete record for {}", ip_address);
            return Ok(());
        }

        let key = cache_key(ip_address);
        let fields = record.hash_fields();
        deadline
            .run(
                "Cache write",
                self.store.write_hash(&key, &fields, self.ttl_secs),
            )
            .await?;

        debug!(
            "Cached {} in {} for {}s",
            key,
            self.store.name(),
            self.ttl_secs
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("8.8.8.8"), "ipinfo:8.8.8.8");
        assert_eq!(cache_key("2001:db8::1"), "ipinfo:2001:db8::1");
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let store = Arc::new(RedisHashStore::new("redis://127.0.0.1:6379/").unwrap());
        let err = CacheClient::new(store, 0).err().unwrap();
        assert!(matches!(err, IpInfoError::Configuration(_)));
    }
}
