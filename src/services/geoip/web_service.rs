//! GeoLite2 / GeoIP2 Web Service 实现
//!
//! `GET {base_url}/geoip/v2.1/city/{ip}` with HTTP basic auth. The HTTP call runs in
//! `spawn_blocking` because the `ureq` agent is synchronous.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;
use tracing::{trace, warn};
use ureq::Agent;

use super::provider::{CityResponse, GeoIpSource, SourceReply};
use crate::config::GeoIpConfig;
use crate::errors::{IpInfoError, Result};

/// Error codes the service uses for addresses it will not answer for.
const ADDRESS_NOT_FOUND_CODES: [&str; 2] = ["IP_ADDRESS_NOT_FOUND", "IP_ADDRESS_RESERVED"];

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub struct WebServiceSource {
    agent: Agent,
    base_url: String,
    authorization: String,
}

impl WebServiceSource {
    pub fn new(config: &GeoIpConfig) -> Result<Self> {
        if config.host.trim().is_empty() {
            return Err(IpInfoError::configuration("GeoIP host must not be empty"));
        }

        // 4xx 也要读取响应体，才能区分 "地址不存在" 与其他错误
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        let credentials = format!("{}:{}", config.account_id, config.license_key);

        Ok(Self {
            agent,
            base_url: base_url(&config.host),
            authorization: format!("Basic {}", STANDARD.encode(credentials)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn city_url(&self, ip: IpAddr) -> String {
        format!("{}/geoip/v2.1/city/{}", self.base_url, ip)
    }

    fn fetch_sync(agent: Agent, url: String, authorization: String) -> Result<SourceReply> {
        let mut resp = agent
            .get(&url)
            .header("Authorization", &authorization)
            .header("Accept", "application/json")
            .call()?;

        let status = resp.status().as_u16();
        let body = resp.body_mut().read_to_string()?;

        trace!("GeoIP web service {} -> HTTP {}", url, status);
        parse_reply(status, &body)
    }
}

#[async_trait]
impl GeoIpSource for WebServiceSource {
    async fn city(&self, ip: IpAddr) -> Result<SourceReply> {
        let url = self.city_url(ip);
        let agent = self.agent.clone();
        let authorization = self.authorization.clone();

        tokio::task::spawn_blocking(move || Self::fetch_sync(agent, url, authorization))
            .await
            .map_err(|e| {
                warn!("GeoIP spawn_blocking failed: {}", e);
                IpInfoError::network(format!("GeoIP request task failed: {}", e))
            })?
    }

    fn name(&self) -> &'static str {
        "WebService"
    }
}

/// `host` may carry its own scheme (useful for plain-HTTP test servers).
fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Interpret a web service reply.
pub(crate) fn parse_reply(status: u16, body: &str) -> Result<SourceReply> {
    if (200..300).contains(&status) {
        if body.trim().is_empty() {
            return Ok(SourceReply::NoData);
        }
        let response: Option<CityResponse> = serde_json::from_str(body)?;
        return Ok(match response {
            Some(response) => SourceReply::Found(response),
            None => SourceReply::NoData,
        });
    }

    let error_body: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let code = error_body.code.unwrap_or_default();
    let message = error_body.error.unwrap_or_else(|| body.trim().to_string());

    if ADDRESS_NOT_FOUND_CODES.contains(&code.as_str()) {
        return Ok(SourceReply::AddressNotFound(message));
    }

    let code = if code.is_empty() {
        "no code"
    } else {
        code.as_str()
    };
    Err(IpInfoError::network(format!(
        "GeoIP web service returned HTTP {} ({}): {}",
        status, code, message
    )))
}
