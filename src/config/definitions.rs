//! 环境变量名与配置键的对应关系

pub const GEOIP_ACCOUNT_ID_ENV: &str = "IPINFO_GEOIP_ACCOUNT_ID";
pub const GEOIP_LICENSE_KEY_ENV: &str = "IPINFO_GEOIP_LICENSE_KEY";
pub const GEOIP_HOST_ENV: &str = "IPINFO_GEOIP_HOST";
pub const GEOIP_TIMEOUT_ENV: &str = "IPINFO_GEOIP_TIMEOUT";
pub const REDIS_URI_ENV: &str = "IPINFO_REDIS_URI";
pub const REDIS_CACHE_TTL_ENV: &str = "IPINFO_REDIS_CACHE_TTL";
pub const LOG_LEVEL_ENV: &str = "IPINFO_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "IPINFO_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "IPINFO_LOG_FILE";

/// Config file read when no path is given; optional.
pub const DEFAULT_CONFIG_PATH: &str = "ipinfo.toml";

/// (environment variable, config key) pairs; the variable wins over the file.
pub const ENV_OVERRIDES: [(&str, &str); 9] = [
    (GEOIP_ACCOUNT_ID_ENV, "geoip.account_id"),
    (GEOIP_LICENSE_KEY_ENV, "geoip.license_key"),
    (GEOIP_HOST_ENV, "geoip.host"),
    (GEOIP_TIMEOUT_ENV, "geoip.timeout_secs"),
    (REDIS_URI_ENV, "redis.uri"),
    (REDIS_CACHE_TTL_ENV, "redis.cache_ttl"),
    (LOG_LEVEL_ENV, "logging.level"),
    (LOG_FORMAT_ENV, "logging.format"),
    (LOG_FILE_ENV, "logging.file"),
];
