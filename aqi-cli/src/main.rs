//! AQI CLI - Command line tool for querying and exporting air quality data.

use aqi_api::ApiConfig;
use clap::Parser;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "aqi-cli", version, about = "Air quality data toolkit")]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "AQI_API_BASE_URL", default_value = aqi_api::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = aqi_api::config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    command: aqi_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = ApiConfig::default()
        .with_base_url(cli.base_url)
        .with_timeout(Duration::from_secs(cli.timeout));
    aqi_cmd::run(config, cli.command).await
}
