//! IP 记录数据模型

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::ip::{parse_ip, validate_as_number, validate_country, validate_network};

/// Hash field names under which a record is stored, in write order.
pub const FIELD_NAMES: [&str; 4] = ["network", "as_number", "country", "organization"];

/// 查询结果
///
/// `Absent` is a valid "no data" outcome; failures travel in the surrounding `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Found(T),
    Absent,
}

impl<T> Outcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Outcome::Absent)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Found(value) => Some(value),
            Outcome::Absent => None,
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Outcome::Found(value) => Some(value),
            Outcome::Absent => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Found(value) => Outcome::Found(f(value)),
            Outcome::Absent => Outcome::Absent,
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Outcome::Found(v),
            None => Outcome::Absent,
        }
    }
}

/// Geolocation and ownership data for a single IP address.
///
/// Empty strings mean "unknown". Every field is validated on construction and the
/// record is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRecord {
    ip_address: String,
    network: String,
    as_number: String,
    country: String,
    organization: String,
}

impl IpRecord {
    /// # Errors
    /// `Validation` if `ip_address` is not an IP literal, or if a non-empty
    /// `network`, `as_number` or `country` is malformed.
    pub fn new(
        ip_address: impl Into<String>,
        network: impl Into<String>,
        as_number: impl Into<String>,
        country: impl Into<String>,
        organization: impl Into<String>,
    ) -> Result<Self> {
        let record = Self {
            ip_address: ip_address.into(),
            network: network.into(),
            as_number: as_number.into(),
            country: country.into(),
            organization: organization.into(),
        };

        parse_ip(&record.ip_address)?;
        if !record.network.is_empty() {
            validate_network(&record.network)?;
        }
        if !record.as_number.is_empty() {
            validate_as_number(&record.as_number)?;
        }
        if !record.country.is_empty() {
            validate_country(&record.country)?;
        }

        Ok(record)
    }

    /// Rebuild a record from stored hash fields. Missing fields read as empty.
    pub fn from_hash_fields(ip_address: &str, fields: &HashMap<String, String>) -> Result<Self> {
        let field = |name: &str| fields.get(name).cloned().unwrap_or_default();
        Self::new(
            ip_address,
            field("network"),
            field("as_number"),
            field("country"),
            field("organization"),
        )
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn as_number(&self) -> &str {
        &self.as_number
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// 四个字段都非空时为 true；只有完整的记录才会写入缓存
    pub fn is_complete(&self) -> bool {
        !self.network.is_empty()
            && !self.as_number.is_empty()
            && !self.country.is_empty()
            && !self.organization.is_empty()
    }

    /// Field/value pairs in [`FIELD_NAMES`] order.
    pub fn hash_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("network", self.network.as_str()),
            ("as_number", self.as_number.as_str()),
            ("country", self.country.as_str()),
            ("organization", self.organization.as_str()),
        ]
    }

    pub fn to_fields(&self) -> IpFields {
        IpFields {
            network: self.network.clone(),
            as_number: self.as_number.clone(),
            country: self.country.clone(),
            organization: self.organization.clone(),
        }
    }
}

/// The resolver's result shape; the address itself is the caller's key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IpFields {
    pub network: String,
    pub as_number: String,
    pub country: String,
    pub organization: String,
}

impl From<IpRecord> for IpFields {
    fn from(record: IpRecord) -> Self {
        Self {
            network: record.network,
            as_number: record.as_number,
            country: record.country,
            organization: record.organization,
        }
    }
}
