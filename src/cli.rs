//! Command-line interface definitions using clap

use clap::Parser;

/// ipinfo-geoip - Resolve IP addresses to network, AS number, country and organization
#[derive(Parser, Debug)]
#[command(name = "ipinfo-geoip")]
#[command(version)]
#[command(about = "Resolve IP addresses through a Redis cache in front of GeoLite2")]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (TOML); defaults to ./ipinfo.toml when present
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Per-lookup deadline in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Print an example configuration file and exit
    #[arg(long)]
    pub sample_config: bool,

    /// IP addresses to resolve
    #[arg(required_unless_present = "sample_config")]
    pub ips: Vec<String>,
}
