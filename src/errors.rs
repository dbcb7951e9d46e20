use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpInfoError {
    Validation(String),
    Configuration(String),
    GeoIpClient { ip_address: String, message: String },
    Cache(String),
    Network(String),
    Type(String),
    Timeout(String),
}

impl IpInfoError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            IpInfoError::Validation(_) => "E001",
            IpInfoError::Configuration(_) => "E002",
            IpInfoError::GeoIpClient { .. } => "E003",
            IpInfoError::Cache(_) => "E004",
            IpInfoError::Network(_) => "E005",
            IpInfoError::Type(_) => "E006",
            IpInfoError::Timeout(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            IpInfoError::Validation(_) => "Validation Error",
            IpInfoError::Configuration(_) => "Configuration Error",
            IpInfoError::GeoIpClient { .. } => "GeoIP Client Error",
            IpInfoError::Cache(_) => "Cache Error",
            IpInfoError::Network(_) => "Network Error",
            IpInfoError::Type(_) => "Type Error",
            IpInfoError::Timeout(_) => "Timeout",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            IpInfoError::Validation(msg) => msg,
            IpInfoError::Configuration(msg) => msg,
            IpInfoError::GeoIpClient { message, .. } => message,
            IpInfoError::Cache(msg) => msg,
            IpInfoError::Network(msg) => msg,
            IpInfoError::Type(msg) => msg,
            IpInfoError::Timeout(msg) => msg,
        }
    }

    /// The queried address, for errors raised on behalf of a specific lookup.
    pub fn ip_address(&self) -> Option<&str> {
        match self {
            IpInfoError::GeoIpClient { ip_address, .. } => Some(ip_address),
            _ => None,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    #[cfg(feature = "cli")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for IpInfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for IpInfoError {}

// 便捷的构造函数
impl IpInfoError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        IpInfoError::Validation(msg.into())
    }

    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        IpInfoError::Configuration(msg.into())
    }

    pub fn geoip_client<A: Into<String>, T: Into<String>>(ip_address: A, msg: T) -> Self {
        IpInfoError::GeoIpClient {
            ip_address: ip_address.into(),
            message: msg.into(),
        }
    }

    pub fn cache<T: Into<String>>(msg: T) -> Self {
        IpInfoError::Cache(msg.into())
    }

    pub fn network<T: Into<String>>(msg: T) -> Self {
        IpInfoError::Network(msg.into())
    }

    pub fn type_error<T: Into<String>>(msg: T) -> Self {
        IpInfoError::Type(msg.into())
    }

    pub fn timeout<T: Into<String>>(msg: T) -> Self {
        IpInfoError::Timeout(msg.into())
    }
}

impl From<redis::RedisError> for IpInfoError {
    fn from(err: redis::RedisError) -> Self {
        IpInfoError::Cache(err.to_string())
    }
}

impl From<ureq::Error> for IpInfoError {
    fn from(err: ureq::Error) -> Self {
        IpInfoError::Network(err.to_string())
    }
}

impl From<std::io::Error> for IpInfoError {
    fn from(err: std::io::Error) -> Self {
        IpInfoError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for IpInfoError {
    fn from(err: serde_json::Error) -> Self {
        IpInfoError::Network(format!("Malformed response body: {}", err))
    }
}

impl From<config::ConfigError> for IpInfoError {
    fn from(err: config::ConfigError) -> Self {
        IpInfoError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IpInfoError>;
