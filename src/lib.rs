//! ipinfo-geoip - IP address to network / AS number / country / organization
//!
//! Lookups go through a Redis cache first and fall back to the MaxMind GeoLite2 web
//! service. Only complete answers are written back, with a fixed TTL.
//!
//! # Features
//! - **cli**: the `ipinfo-geoip` binary (default)
//!
//! # Architecture
//! - `record`: the IP record, its validation and the `Outcome` type
//! - `services`: GeoIP client and the cache-aside `Resolver`
//! - `cache`: cache client and the Redis hash store
//! - `config`: configuration loading
//! - `system`: logging setup

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod deadline;
pub mod errors;
pub mod record;
pub mod services;
pub mod system;
pub mod utils;

pub use errors::{IpInfoError, Result};
pub use record::{IpFields, IpRecord, Outcome};
pub use services::Resolver;
