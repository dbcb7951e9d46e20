//! GeoIP 服务模块
//!
//! 通过 MaxMind GeoLite2 Web Service 查询网络、AS 号、国家和组织。

pub mod normalize;
mod provider;
mod web_service;

pub use provider::{
    CityResponse, CountryRecord, GeoIpClient, GeoIpSource, SourceReply, TraitsRecord,
};
pub use web_service::WebServiceSource;
