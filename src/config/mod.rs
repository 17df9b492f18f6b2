//! Configuration management for ndws.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! ndws reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `NDWS_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation of ranges and credentials
//!
//! Command-line flags take precedence over everything loaded here.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ndws::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ndws.toml")?;
//!
//! println!("Platform: {}", config.platform.base_url);
//! println!("Kernel size: {}", config.dataset.kernel_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run mode
//! - [`PlatformConfig`] - Export platform connection and authentication
//! - [`ExportConfig`] - Destination bucket, date range and file prefix
//! - [`DatasetConfig`] - Sampling parameters and split planning
//! - [`LoggingConfig`] - Local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [platform]
//! base_url = "https://export.example.com"
//! project = "fire-research"
//! auth_type = "bearer"
//! access_token = "${NDWS_ACCESS_TOKEN}"
//!
//! [export]
//! bucket = "my-bucket"
//! start_date = "2020-01-01"
//! end_date = "2021-01-01"
//!
//! [dataset]
//! kernel_size = 64
//! sampling_scale = 1000
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_PATH};
pub use schema::{
    ApplicationConfig, AuthType, DatasetConfig, ExportConfig, LoggingConfig, NdwsConfig,
    PlatformConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
