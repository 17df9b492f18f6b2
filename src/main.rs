// ndws - Next Day Wildfire Spread training-data exporter
// Copyright (c) 2025 ndws Contributors
// Licensed under the MIT License

use clap::Parser;
use ndws::cli::{self, Cli};
use ndws::config::{load_config_or_default, LoggingConfig};
use ndws::domain::errors::EXIT_FATAL;
use ndws::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the configuration when it loads; the
    // command reports any configuration error itself
    let file_config = load_config_or_default(cli.config.as_deref()).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = file_config.map(|c| c.logging).unwrap_or_else(LoggingConfig::default);

    let _guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(e.exit_code());
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "ndws - Next Day Wildfire Spread exporter"
    );

    let exit_code = match cli::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    drop(_guard);
    process::exit(exit_code);
}
