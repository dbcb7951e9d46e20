use ipinfo_geoip::errors::{IpInfoError, Result};
use std::error::Error;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = IpInfoError::validation("Invalid IP address: 'x'");

        assert!(matches!(error, IpInfoError::Validation(_)));
        assert_eq!(error.code(), "E001");
        assert!(error.to_string().contains("Validation Error"));
        assert!(error.to_string().contains("Invalid IP address"));
    }

    #[test]
    fn test_geoip_client_error_keeps_address() {
        let error = IpInfoError::geoip_client("192.0.2.1", "Address not found: 192.0.2.1");

        assert_eq!(error.code(), "E003");
        assert_eq!(error.ip_address(), Some("192.0.2.1"));
        assert_eq!(error.message(), "Address not found: 192.0.2.1");
        assert_eq!(
            error.to_string(),
            "GeoIP Client Error: Address not found: 192.0.2.1"
        );
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            IpInfoError::validation(""),
            IpInfoError::configuration(""),
            IpInfoError::geoip_client("", ""),
            IpInfoError::cache(""),
            IpInfoError::network(""),
            IpInfoError::type_error(""),
            IpInfoError::timeout(""),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_only_geoip_errors_carry_address() {
        assert_eq!(IpInfoError::cache("down").ip_address(), None);
    }
}

#[cfg(test)]
mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let error: IpInfoError = io_error.into();

        assert!(matches!(error, IpInfoError::Network(_)));
        assert!(error.to_string().contains("reset by peer"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json").unwrap_err();
        let error: IpInfoError = json_error.into();

        assert!(matches!(error, IpInfoError::Network(_)));
        assert!(error.message().starts_with("Malformed response body"));
    }

    #[test]
    fn test_redis_error_conversion() {
        let redis_error = redis::Client::open("not a redis url").unwrap_err();
        let error: IpInfoError = redis_error.into();

        assert!(matches!(error, IpInfoError::Cache(_)));
    }
}

#[cfg(test)]
mod error_trait_tests {
    use super::*;

    #[test]
    fn test_error_trait_implementation() {
        let error = IpInfoError::timeout("GeoIP lookup did not complete before the deadline");
        let dyn_error: &dyn Error = &error;

        assert!(dyn_error.source().is_none());
        assert!(dyn_error.to_string().starts_with("Timeout"));
    }

    #[test]
    fn test_result_alias() {
        fn fails() -> Result<()> {
            Err(IpInfoError::type_error("boolean"))
        }
        assert!(matches!(fails(), Err(IpInfoError::Type(_))));
    }
}
