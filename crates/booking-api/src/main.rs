//! Event booking API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p booking-api
//! ```
//!
//! Configuration is read from environment variables (and `.env`).

use booking_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let tracing_config = if config.app.env.is_production() {
        TracingConfig::production()
    } else {
        TracingConfig::development()
    };
    if let Err(e) = try_init_tracing_with_config(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        address = %config.api.address(),
        "Starting event booking API"
    );

    if let Err(e) = booking_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
