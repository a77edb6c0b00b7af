//! Log backend for the `log` macros used across the crate

use crate::error::Result;

/// Install the ESP-IDF console logger
#[cfg(target_os = "espidf")]
pub fn init() -> Result<()> {
    esp_idf_svc::log::EspLogger::initialize_default();
    Ok(())
}

/// Install the host logger, filtered by `RUST_LOG` (default `info`)
#[cfg(not(target_os = "espidf"))]
pub fn init() -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    init_with_filter(&filter)
}

/// Install the host logger with explicit filter directives
///
/// `log` records reach the `tracing` fmt subscriber through `tracing-log`.
#[cfg(not(target_os = "espidf"))]
pub fn init_with_filter(directives: &str) -> Result<()> {
    use crate::error::Error;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(directives))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| Error::General(format!("Failed to install logger: {}", e)))
}
