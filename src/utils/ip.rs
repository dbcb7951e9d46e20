//! IP 地址与网络字面量校验
//!
//! 所有校验都是纯函数，在任何 I/O 之前执行。

use std::net::IpAddr;

use crate::errors::{IpInfoError, Result};

/// Parse an IPv4 or IPv6 literal.
pub fn parse_ip(ip_address: &str) -> Result<IpAddr> {
    ip_address
        .parse::<IpAddr>()
        .map_err(|_| IpInfoError::validation(format!("Invalid IP address: '{}'", ip_address)))
}

/// CIDR 检查
///
/// Accepts `addr/prefix` or a bare address (host network). Host bits below the
/// prefix must be zero, so `192.0.2.1/24` is rejected while `192.0.2.0/24` passes.
pub fn validate_network(network: &str) -> Result<()> {
    let invalid = || IpInfoError::validation(format!("Invalid network: '{}'", network));

    let (addr, prefix_len) = match network.split_once('/') {
        Some((addr, prefix)) => {
            // u8::from_str 接受前导 '+'，这里只允许纯数字
            if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let prefix_len: u8 = prefix.parse().map_err(|_| invalid())?;
            (addr, Some(prefix_len))
        }
        None => (network, None),
    };

    let addr: IpAddr = addr.parse().map_err(|_| invalid())?;

    match addr {
        IpAddr::V4(v4) => {
            let prefix_len = prefix_len.unwrap_or(32);
            if prefix_len > 32 {
                return Err(invalid());
            }
            let mask = u32::MAX.checked_shl(32 - prefix_len as u32).unwrap_or(0);
            if u32::from_be_bytes(v4.octets()) & !mask != 0 {
                return Err(invalid());
            }
        }
        IpAddr::V6(v6) => {
            let prefix_len = prefix_len.unwrap_or(128);
            if prefix_len > 128 {
                return Err(invalid());
            }
            let mask = u128::MAX.checked_shl(128 - prefix_len as u32).unwrap_or(0);
            if u128::from_be_bytes(v6.octets()) & !mask != 0 {
                return Err(invalid());
            }
        }
    }

    Ok(())
}

/// AS number: decimal digits, value in `[0, 2^32)`.
pub fn validate_as_number(as_number: &str) -> Result<()> {
    let valid = !as_number.is_empty()
        && as_number.bytes().all(|b| b.is_ascii_digit())
        && as_number.parse::<u32>().is_ok();

    if valid {
        Ok(())
    } else {
        Err(IpInfoError::validation(format!(
            "AS number out of range: '{}'",
            as_number
        )))
    }
}

/// ISO 3166-1 alpha-2, counted in characters rather than bytes.
pub fn validate_country(country: &str) -> Result<()> {
    if country.chars().count() == 2 {
        Ok(())
    } else {
        Err(IpInfoError::validation(format!(
            "Country code must be 2 characters: '{}'",
            country
        )))
    }
}
