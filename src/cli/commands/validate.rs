//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the ndws configuration file.

use crate::config::{load_config_or_default, DEFAULT_CONFIG_PATH};
use crate::domain::errors::{EXIT_INVALID_INPUT, EXIT_SUCCESS};
use crate::domain::Feature;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let source = config_source(config_path);
        tracing::info!(source = %source, "Validating configuration");

        println!("🔍 Validating {source}");
        println!();

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_INVALID_INPUT);
            }
        };

        let dataset = match config.dataset.to_spec() {
            Ok(spec) => spec,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_INVALID_INPUT);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Platform: {} ({})", config.platform.base_url, config.platform.vendor);
        println!("  Project: {}", config.platform.project);
        println!("  Auth Type: {}", config.platform.auth_type);
        println!(
            "  Bucket: {}",
            config.export.bucket.as_deref().unwrap_or("(set with --bucket)")
        );
        println!(
            "  Date Range: {} to {}",
            config.export.start_date.as_deref().unwrap_or("?"),
            config.export.end_date.as_deref().unwrap_or("?")
        );
        println!("  File Prefix: {}", config.export.file_name_prefix);
        println!("  Kernel Size: {} px", dataset.kernel_size);
        println!("  Sampling Scale: {} m", dataset.sampling_scale);
        println!("  Samples per File: {}", dataset.num_samples_per_file);
        println!("  Features:");
        for feature in &dataset.features {
            println!("    - {}", describe_feature(feature));
        }
        println!("  Label: {}", describe_feature(&dataset.label));
        println!(
            "  Split: {}-day windows, eval/test ratio {}, seed {}",
            dataset.window_length_days, dataset.eval_split_ratio, dataset.seed
        );
        println!();

        Ok(EXIT_SUCCESS)
    }
}

/// Describes where the configuration comes from
fn config_source(config_path: Option<&Path>) -> String {
    match config_path {
        Some(path) => format!("configuration file: {}", path.display()),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            format!("configuration file: {DEFAULT_CONFIG_PATH}")
        }
        None => format!("built-in defaults (no {DEFAULT_CONFIG_PATH} found)"),
    }
}

fn describe_feature(feature: &Feature) -> String {
    format!(
        "{} - {} ({})",
        feature.name(),
        feature.description(),
        feature.source()
    )
}
