//! Cache-aside resolution
//!
//! 1. validate the address
//! 2. cache hit → return it, the GeoIP service is not called
//! 3. miss → GeoIP service
//! 4. absent → absent, nothing cached
//! 5. found → write back, return it

use tracing::{debug, info};

use crate::cache::CacheClient;
use crate::config::AppConfig;
use crate::deadline::Deadline;
use crate::errors::Result;
use crate::record::{IpFields, Outcome};
use crate::services::geoip::GeoIpClient;
use crate::utils::ip::parse_ip;

#[derive(Clone)]
pub struct Resolver {
    cache: CacheClient,
    geoip: GeoIpClient,
}

impl Resolver {
    pub fn new(cache: CacheClient, geoip: GeoIpClient) -> Self {
        Self { cache, geoip }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let cache = CacheClient::from_config(&config.redis)?;
        let geoip = GeoIpClient::from_config(&config.geoip)?;
        info!(
            "Resolver initialized: GeoIP via {}, cache TTL {}s",
            geoip.source_name(),
            cache.ttl_secs()
        );
        Ok(Self::new(cache, geoip))
    }

    /// 查询 IP 信息（不设截止时间）
    pub async fn lookup(&self, ip_address: &str) -> Result<Outcome<IpFields>> {
        self.lookup_until(ip_address, Deadline::none()).await
    }

    /// Resolve `ip_address`, giving up with a `Timeout` error once `deadline` passes.
    ///
    /// Errors from either collaborator propagate unchanged. A cache outage fails the
    /// lookup instead of falling through to the metered GeoIP service.
    pub async fn lookup_until(
        &self,
        ip_address: &str,
        deadline: Deadline,
    ) -> Result<Outcome<IpFields>> {
        parse_ip(ip_address)?;

        if let Outcome::Found(record) = self.cache.get(ip_address, deadline).await? {
            debug!("Resolved {} from cache", ip_address);
            return Ok(Outcome::Found(record.into()));
        }

        let record = match self.geoip.resolve(ip_address, deadline).await? {
            Outcome::Found(record) => record,
            Outcome::Absent => {
                debug!("No usable GeoIP data for {}", ip_address);
                return Ok(Outcome::Absent);
            }
        };

        // put() re-checks completeness
        self.cache.put(ip_address, Some(&record), deadline).await?;

        debug!("Resolved {} from {}", ip_address, self.geoip.source_name());
        Ok(Outcome::Found(record.into()))
    }
}
