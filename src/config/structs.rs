use serde::{Deserialize, Serialize};

use super::definitions::*;
use crate::errors::{IpInfoError, Result};

/// 应用配置
///
/// Built once at startup and handed to each client's constructor; nothing reads
/// the process environment after that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub geoip: GeoIpConfig,
    pub redis: RedisConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GeoLite2 Web Service 配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoIpConfig {
    pub account_id: u64,
    pub license_key: String,
    pub host: String,
    #[serde(default = "default_geoip_timeout")]
    pub timeout_secs: u64,
}

/// Redis 配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedisConfig {
    pub uri: String,
    /// 缓存 TTL（秒）
    pub cache_ttl: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_geoip_timeout() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

/// Everything optional, so that missing settings can be reported together.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    geoip: RawGeoIpConfig,
    #[serde(default)]
    redis: RawRedisConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
struct RawGeoIpConfig {
    account_id: Option<String>,
    license_key: Option<String>,
    host: Option<String>,
    timeout_secs: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRedisConfig {
    uri: Option<String>,
    cache_ttl: Option<String>,
}

impl AppConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML > 默认值. Without `path`, `ipinfo.toml` is read if it exists;
    /// an explicit `path` must exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// Like [`AppConfig::load`], reading variables through `env` instead of the
    /// process environment.
    pub fn load_with<F>(path: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        use config::{Config, File, FileFormat};

        let file = match path {
            Some(path) => File::new(path, FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(false),
        };

        let mut builder = Config::builder().add_source(file);
        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, env(var))?;
        }

        let raw: RawConfig = builder.build()?.try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        let mut missing = Vec::new();
        if raw.geoip.account_id.is_none() {
            missing.push(GEOIP_ACCOUNT_ID_ENV);
        }
        if raw.geoip.license_key.is_none() {
            missing.push(GEOIP_LICENSE_KEY_ENV);
        }
        if raw.geoip.host.is_none() {
            missing.push(GEOIP_HOST_ENV);
        }
        if raw.redis.uri.is_none() {
            missing.push(REDIS_URI_ENV);
        }
        if raw.redis.cache_ttl.is_none() {
            missing.push(REDIS_CACHE_TTL_ENV);
        }
        if !missing.is_empty() {
            return Err(IpInfoError::configuration(format!(
                "Missing environment variables: {}",
                missing.join(", ")
            )));
        }

        let account_id = parse_number(GEOIP_ACCOUNT_ID_ENV, raw.geoip.account_id)?;
        let cache_ttl = parse_number(REDIS_CACHE_TTL_ENV, raw.redis.cache_ttl)?;
        if cache_ttl == 0 {
            return Err(IpInfoError::configuration(format!(
                "{} must be greater than 0",
                REDIS_CACHE_TTL_ENV
            )));
        }
        let timeout_secs = match raw.geoip.timeout_secs {
            Some(value) => parse_number(GEOIP_TIMEOUT_ENV, Some(value))?,
            None => default_geoip_timeout(),
        };

        Ok(Self {
            geoip: GeoIpConfig {
                account_id,
                license_key: raw.geoip.license_key.unwrap_or_default(),
                host: raw.geoip.host.unwrap_or_default(),
                timeout_secs,
            },
            redis: RedisConfig {
                uri: raw.redis.uri.unwrap_or_default(),
                cache_ttl,
            },
            logging: raw.logging,
        })
    }

    /// 生成示例 TOML 配置文件
    pub fn sample_toml() -> String {
        let sample = Self {
            geoip: GeoIpConfig {
                account_id: 123456,
                license_key: "your_license_key".to_string(),
                host: "geolite.info".to_string(),
                timeout_secs: default_geoip_timeout(),
            },
            redis: RedisConfig {
                uri: "redis://127.0.0.1:6379/0".to_string(),
                cache_ttl: 86400,
            },
            logging: LoggingConfig::default(),
        };
        toml::to_string_pretty(&sample)
            .unwrap_or_else(|e| format!("# Error generating sample config: {}", e))
    }
}

fn parse_number(name: &str, value: Option<String>) -> Result<u64> {
    let value = value.unwrap_or_default();
    value.trim().parse::<u64>().map_err(|_| {
        IpInfoError::configuration(format!(
            "{} must be a non-negative integer, got '{}'",
            name, value
        ))
    })
}
