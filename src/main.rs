use std::time::Duration;

use clap::Parser;
use ipinfo_geoip::cli::Cli;
use ipinfo_geoip::config::AppConfig;
use ipinfo_geoip::deadline::Deadline;
use ipinfo_geoip::record::Outcome;
use ipinfo_geoip::services::Resolver;
use ipinfo_geoip::system::init_logging;
use serde_json::json;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.sample_config {
        print!("{}", AppConfig::sample_toml());
        return Ok(());
    }

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(2);
        }
    };
    let _guard = init_logging(&config.logging);
    debug!("Configuration loaded");

    let resolver = Resolver::from_config(&config)?;

    let mut failures = 0usize;
    for ip in &cli.ips {
        let deadline = cli
            .timeout_ms
            .map(|ms| Deadline::after(Duration::from_millis(ms)))
            .unwrap_or_default();

        match resolver.lookup_until(ip, deadline).await {
            Ok(Outcome::Found(fields)) => {
                println!("{}", json!({ "ip_address": ip, "result": fields }));
            }
            Ok(Outcome::Absent) => {
                println!("{}", json!({ "ip_address": ip, "result": null }));
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} ({})", e.format_colored(), ip);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} lookups failed", failures, cli.ips.len());
    }
    Ok(())
}
