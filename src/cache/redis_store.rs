use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tokio::sync::RwLock;
use tracing::{debug, error, trace};

use crate::cache::traits::HashStore;
use crate::errors::{IpInfoError, Result};

pub struct RedisHashStore {
    client: redis::Client,
    /// 持久化连接，使用 RwLock 保护
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
}

impl RedisHashStore {
    /// The connection is opened lazily on first use, so an unreachable server
    /// surfaces as a cache error on the first lookup rather than here.
    pub fn new(uri: &str) -> Result<Self> {
        let client = redis::Client::open(uri).map_err(|e| {
            IpInfoError::configuration(format!("Invalid Redis URI '{}': {}", uri, e))
        })?;

        debug!("RedisHashStore created for {}", uri);

        Ok(Self {
            client,
            connection: Arc::new(RwLock::new(None)),
        })
    }

    /// 获取或建立持久连接
    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        let mut conn_guard = self.connection.write().await;

        // 双重检查，避免竞态条件
        if let Some(ref conn) = *conn_guard {
            return Ok(conn.clone());
        }

        let new_conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| IpInfoError::cache(format!("Redis connection error: {}", e)))?;
        *conn_guard = Some(new_conn.clone());
        debug!("Redis connection established and cached");

        Ok(new_conn)
    }

    /// 重置连接（在连接错误时调用）
    async fn reset_connection(&self) {
        let mut conn_guard = self.connection.write().await;
        *conn_guard = None;
        debug!("Redis connection reset due to error");
    }
}

#[async_trait]
impl HashStore for RedisHashStore {
    async fn read_hash(&self, key: &str) -> Result<HashMap<String, String>> {
        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return Err(e);
            }
        };

        match conn.hgetall::<_, HashMap<String, String>>(key).await {
            Ok(fields) => {
                trace!("HGETALL {} -> {} fields", key, fields.len());
                Ok(fields)
            }
            Err(e) => {
                error!("Failed to read key '{}': {}", key, e);
                // 连接可能已断开，重置连接
                self.reset_connection().await;
                Err(e.into())
            }
        }
    }

    async fn write_hash(&self, key: &str, fields: &[(&str, &str)], ttl_secs: u64) -> Result<()> {
        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return Err(e);
            }
        };

        let ttl = i64::try_from(ttl_secs)
            .map_err(|_| IpInfoError::configuration(format!("TTL too large: {}", ttl_secs)))?;

        // MULTI/EXEC：避免写入了字段却没有设置过期时间
        let result = redis::pipe()
            .atomic()
            .hset_multiple(key, fields)
            .ignore()
            .expire(key, ttl)
            .ignore()
            .query_async::<()>(&mut conn)
            .await;

        match result {
            Ok(()) => {
                trace!("Successfully cached key {} with TTL {}s", key, ttl_secs);
                Ok(())
            }
            Err(e) => {
                error!("Failed to write key '{}': {}", key, e);
                self.reset_connection().await;
                Err(e.into())
            }
        }
    }

    fn name(&self) -> &'static str {
        "Redis"
    }
}
