//! GeoIP 查询抽象层
//!
//! `GeoIpSource` is the raw outbound call; `GeoIpClient` validates the address,
//! normalizes the reply into an [`IpRecord`] and applies the completeness gate.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, trace};

use super::normalize::to_field_string;
use super::web_service::WebServiceSource;
use crate::config::GeoIpConfig;
use crate::deadline::Deadline;
use crate::errors::{IpInfoError, Result};
use crate::record::{IpRecord, Outcome};
use crate::utils::ip::parse_ip;

/// City 查询响应中用到的部分
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CityResponse {
    #[serde(default)]
    pub country: CountryRecord,
    #[serde(default)]
    pub traits: TraitsRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CountryRecord {
    #[serde(default)]
    pub iso_code: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TraitsRecord {
    #[serde(default)]
    pub network: Value,
    #[serde(default)]
    pub autonomous_system_number: Value,
    #[serde(default)]
    pub autonomous_system_organization: Value,
}

/// What the external service said about an address.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceReply {
    Found(CityResponse),
    /// 服务没有返回任何数据对象
    NoData,
    /// The service rejected the address; carries the service's own explanation.
    AddressNotFound(String),
}

/// 外部 GeoIP 服务 trait
#[async_trait]
pub trait GeoIpSource: Send + Sync {
    /// Transport failures come back as `Err`; a rejected address is
    /// [`SourceReply::AddressNotFound`].
    async fn city(&self, ip: IpAddr) -> Result<SourceReply>;

    /// 获取 source 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// GeoIP client in front of a [`GeoIpSource`].
#[derive(Clone)]
pub struct GeoIpClient {
    source: Arc<dyn GeoIpSource>,
}

impl GeoIpClient {
    pub fn new(source: Arc<dyn GeoIpSource>) -> Self {
        Self { source }
    }

    /// 使用 GeoLite2 Web Service
    pub fn from_config(config: &GeoIpConfig) -> Result<Self> {
        let source = WebServiceSource::new(config)?;
        info!("GeoIP: Using web service at {}", source.base_url());
        Ok(Self::new(Arc::new(source)))
    }

    /// Look up `ip_address` with the external service.
    ///
    /// Returns `Absent` when the service has no data object or when any of the four
    /// fields comes back empty, so partial data never reaches the cache.
    ///
    /// # Errors
    /// - `Validation` for a malformed address (no network call is made) or an
    ///   invalid field value in the reply
    /// - `GeoIpClient` when the service reports the address as not found
    /// - `Type` for boolean or structured field values
    /// - `Network` / `Timeout` from the transport
    pub async fn resolve(&self, ip_address: &str, deadline: Deadline) -> Result<Outcome<IpRecord>> {
        let ip = parse_ip(ip_address)?;

        let reply = deadline.run("GeoIP lookup", self.source.city(ip)).await?;

        let response = match reply {
            SourceReply::Found(response) => response,
            SourceReply::NoData => {
                debug!(
                    "GeoIP: {} returned no data for {}",
                    self.source.name(),
                    ip_address
                );
                return Ok(Outcome::Absent);
            }
            SourceReply::AddressNotFound(cause) => {
                return Err(IpInfoError::geoip_client(
                    ip_address,
                    format!("Address not found: {} ({})", ip_address, cause),
                ));
            }
        };

        let network = to_field_string(&response.traits.network)?;
        let as_number = to_field_string(&response.traits.autonomous_system_number)?;
        let country = to_field_string(&response.country.iso_code)?;
        let organization = to_field_string(&response.traits.autonomous_system_organization)?;

        let record = IpRecord::new(ip_address, network, as_number, country, organization)?;

        if !record.is_complete() {
            debug!(
                "GeoIP: Incomplete data for {}, treating as absent: {:?}",
                ip_address, record
            );
            return Ok(Outcome::Absent);
        }

        trace!("GeoIP lookup for {}: {:?}", ip_address, record);
        Ok(Outcome::Found(record))
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}
