//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::domain::errors::{EXIT_FATAL, EXIT_INVALID_INPUT, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ndws.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing ndws configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_INVALID_INPUT);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your platform settings", self.output);
                println!("  2. Put NDWS_ACCESS_TOKEN in your environment or a .env file");
                println!("  3. Validate configuration: ndws validate-config");
                println!(
                    "  4. Run export: ndws --bucket=<BUCKET> --start_date=<YYYY-MM-DD> --end_date=<YYYY-MM-DD>"
                );
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# ndws Configuration File
# Next Day Wildfire Spread training-data exporter

[application]
log_level = "info"
dry_run = false

[platform]
vendor = "rest"
base_url = "https://export.example.com"
project = "my-project"
auth_type = "bearer"
access_token = "${NDWS_ACCESS_TOKEN}"
timeout_seconds = 60

[export]
# bucket, start_date and end_date may also be given on the command line
# bucket = "my-bucket"
# start_date = "2020-01-01"
# end_date = "2021-01-01"
file_name_prefix = "next_day_wildfire_spread"

[dataset]
kernel_size = 64
sampling_scale = 1000
num_samples_per_file = 2000

[logging]
local_enabled = false
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# ndws Configuration File
# Next Day Wildfire Spread training-data exporter
#
# Every setting has a default; command-line flags override this file and
# NDWS_<SECTION>_<KEY> environment variables override both the file and
# its defaults (for example NDWS_PLATFORM_BASE_URL).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (plan the export without contacting the platform)
dry_run = false

# ============================================================================
# Export Platform
# ============================================================================
[platform]
# Platform implementation (currently only "rest")
vendor = "rest"

# Base URL of the platform API
base_url = "https://export.example.com"

# Project the export jobs run in
project = "my-project"

# Authentication type: bearer | basic | none
auth_type = "bearer"

# Access token for bearer authentication (use an environment variable)
access_token = "${NDWS_ACCESS_TOKEN}"

# Credentials for basic authentication
# username = "${NDWS_USERNAME}"
# password = "${NDWS_PASSWORD}"

# Request timeout in seconds
timeout_seconds = 60

# TLS certificate verification; only disable for local test servers
tls_verify = true

# ============================================================================
# Export Destination
# ============================================================================
[export]
# Destination bucket (--bucket)
# bucket = "my-bucket"

# Inclusive date range (--start_date / --end_date)
# start_date = "2020-01-01"
# end_date = "2021-01-01"

# Prefix of the exported files inside the bucket (--prefix)
file_name_prefix = "next_day_wildfire_spread"

# ============================================================================
# Dataset
# ============================================================================
[dataset]
# Side length of each sampled patch in pixels (8-1024)
kernel_size = 64

# Resolution of the sampled patches in metres per pixel (10-100000)
sampling_scale = 1000

# Number of examples per output file (1-100000)
num_samples_per_file = 2000

# Input channels
features = [
    "elevation", "th", "vs", "tmmn", "tmmx", "sph",
    "pr", "pdsi", "NDVI", "population", "erc", "PrevFireMask",
]

# Label channel
label = "FireMask"

# Days are split into windows of this length before assigning splits
window_length_days = 8

# Fraction of windows held out for eval, and the same again for test [0, 0.5)
eval_split_ratio = 0.1

# Seed of the split shuffle
seed = 123

# ============================================================================
# Logging
# ============================================================================
[logging]
# Write JSON log files in addition to console output
local_enabled = false

# Directory of the log files
local_path = "./logs"

# Rotation: daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NdwsConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_configs_parse() {
        let minimal: NdwsConfig = toml::from_str(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(minimal.dataset.kernel_size, 64);

        let full: NdwsConfig =
            toml::from_str(&InitArgs::generate_config_with_examples()).unwrap();
        assert_eq!(full.dataset.features.len(), 12);
        assert_eq!(full.dataset.label, "FireMask");
        assert!(full.dataset.to_spec().is_ok());
    }

    #[tokio::test]
    async fn test_init_writes_file_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("ndws.toml").to_string_lossy().to_string();

        let args = InitArgs {
            output: output.clone(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_SUCCESS);
        assert!(Path::new(&output).exists());

        assert_eq!(args.execute().await.unwrap(), EXIT_INVALID_INPUT);

        let forced = InitArgs {
            force: true,
            ..args
        };
        assert_eq!(forced.execute().await.unwrap(), EXIT_SUCCESS);
    }
}
