//! Service layer
//!
//! The GeoIP client and the resolver that puts the cache in front of it.

pub mod geoip;
pub mod resolver;

pub use geoip::{GeoIpClient, GeoIpSource, SourceReply};
pub use resolver::Resolver;
