//! E-Shop Dashboard
//!
//! Interactive terminal dashboard for browsing and managing a shop catalog served by the
//! e-shop REST API.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use anyhow::{Context, Result};
use clap::Parser;
use eshop_client::ApiClient;
use eshop_core::{Config, LogFormat};
use eshop_dashboard::{Dashboard, Shell};
use std::path::PathBuf;
use tracing::info;

/// Command line interface for the dashboard
#[derive(Parser)]
#[command(
    name = "eshop-dashboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Terminal admin dashboard for the e-shop catalog",
    long_about = "Browse, search and paginate the product catalog, log in or register, and create, edit or delete products against the e-shop REST API."
)]
struct Cli {
    /// Configuration file path (defaults to ./eshop.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API base URL, e.g. http://127.0.0.1:8000/api
    #[arg(long, value_name = "URL", env = "ESHOP_API_URL")]
    api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(url) = self.api_url {
            config.api.base_url = url;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if self.json {
            config.logging.format = LogFormat::Json;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate()?;

    eshop_core::init_logging(&config.logging)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        api = %config.api.base_url,
        "E-Shop Dashboard starting"
    );

    let client = ApiClient::from_config(&config.api)?;
    let mut shell = Shell::new(Dashboard::new(client))?;
    shell.run().await?;

    info!("E-Shop Dashboard stopped");
    Ok(())
}
