//! Core types and utilities for the e-shop dashboard

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, Config, LogFormat, LoggingConfig};
pub use error::{Error, Result};
pub use types::{
    AccessToken, Category, CategoryId, Credentials, LoginResponse, PAGE_SIZE, Page, Product,
    ProductId, ProductPayload, ProductQuery, Registration, SortKey, total_pages,
};
pub use rust_decimal::Decimal;

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to stderr so it
/// never interleaves with the dashboard screen.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| Error::Logging(e.to_string()))
}
