//! Export command implementation
//!
//! This module implements the `export` command, which validates the
//! parameters, builds the export request and submits it to the platform.

use crate::config::{load_config_or_default, NdwsConfig};
use crate::core::export::{ExportCoordinator, ExportSummary};
use crate::domain::errors::EXIT_SUCCESS;
use crate::domain::{ExportRequest, NdwsError};
use clap::Args;
use std::path::Path;

/// Arguments for the export command
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct ExportArgs {
    /// Destination bucket (a leading gs:// is accepted)
    #[arg(long, value_name = "BUCKET")]
    pub bucket: Option<String>,

    /// First day to export
    #[arg(long = "start_date", alias = "start-date", value_name = "YYYY-MM-DD")]
    pub start_date: Option<String>,

    /// Last day to export (inclusive)
    #[arg(long = "end_date", alias = "end-date", value_name = "YYYY-MM-DD")]
    pub end_date: Option<String>,

    /// Prefix of the exported files inside the bucket
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Side length of each sampled patch, in pixels
    #[arg(long, value_name = "PIXELS")]
    pub kernel_size: Option<u32>,

    /// Resolution of the sampled patches, in metres per pixel
    #[arg(long, value_name = "METRES")]
    pub sampling_scale: Option<u32>,

    /// Number of examples written to each output file
    #[arg(long, value_name = "N")]
    pub num_samples_per_file: Option<u32>,

    /// Fraction of day windows held out for eval, and again for test
    #[arg(long, value_name = "RATIO")]
    pub eval_split_ratio: Option<f64>,

    /// Dry run mode - plan the export without contacting the platform
    #[arg(long)]
    pub dry_run: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        tracing::debug!("Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_error(&e, "Failed to load configuration")),
        };

        self.apply_overrides(&mut config);

        let request = match self.build_request(&config) {
            Ok(r) => r,
            Err(e) => return Ok(report_error(&e, "Invalid export parameters")),
        };

        let coordinator = match ExportCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => return Ok(report_error(&e, "Failed to initialize export platform")),
        };

        if coordinator.is_dry_run() {
            println!("🔍 DRY RUN MODE - the export will not be submitted");
            println!();
        }

        let summary = match coordinator.execute_export(&request).await {
            Ok(s) => s,
            Err(e) => return Ok(report_error(&e, "Export failed")),
        };

        summary.log_summary();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary);
        }

        Ok(EXIT_SUCCESS)
    }

    /// Fills every flag left unset here from `fallback`
    pub fn or(self, fallback: ExportArgs) -> ExportArgs {
        ExportArgs {
            bucket: self.bucket.or(fallback.bucket),
            start_date: self.start_date.or(fallback.start_date),
            end_date: self.end_date.or(fallback.end_date),
            prefix: self.prefix.or(fallback.prefix),
            kernel_size: self.kernel_size.or(fallback.kernel_size),
            sampling_scale: self.sampling_scale.or(fallback.sampling_scale),
            num_samples_per_file: self.num_samples_per_file.or(fallback.num_samples_per_file),
            eval_split_ratio: self.eval_split_ratio.or(fallback.eval_split_ratio),
            dry_run: self.dry_run || fallback.dry_run,
            json: self.json || fallback.json,
        }
    }

    /// Applies command-line values on top of the configuration
    fn apply_overrides(&self, config: &mut NdwsConfig) {
        if let Some(bucket) = &self.bucket {
            config.export.bucket = Some(bucket.clone());
        }
        if let Some(start_date) = &self.start_date {
            config.export.start_date = Some(start_date.clone());
        }
        if let Some(end_date) = &self.end_date {
            config.export.end_date = Some(end_date.clone());
        }
        if let Some(prefix) = &self.prefix {
            config.export.file_name_prefix = prefix.clone();
        }
        if let Some(kernel_size) = self.kernel_size {
            config.dataset.kernel_size = kernel_size;
        }
        if let Some(sampling_scale) = self.sampling_scale {
            config.dataset.sampling_scale = sampling_scale;
        }
        if let Some(num_samples) = self.num_samples_per_file {
            config.dataset.num_samples_per_file = num_samples;
        }
        if let Some(ratio) = self.eval_split_ratio {
            config.dataset.eval_split_ratio = ratio;
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
    }

    /// Builds the export request from the merged configuration
    fn build_request(&self, config: &NdwsConfig) -> crate::domain::Result<ExportRequest> {
        let mut builder = ExportRequest::builder()
            .file_name_prefix(config.export.file_name_prefix.clone())
            .dataset(config.dataset.to_spec()?);

        if let Some(bucket) = &config.export.bucket {
            builder = builder.bucket(bucket.clone());
        }
        if let Some(start_date) = &config.export.start_date {
            builder = builder.start_date(start_date.clone());
        }
        if let Some(end_date) = &config.export.end_date {
            builder = builder.end_date(end_date.clone());
        }

        builder.build()
    }
}

/// Prints and logs an error, returning its exit code
fn report_error(error: &NdwsError, context: &str) -> i32 {
    crate::log_error_with_context!(error, context);
    eprintln!("❌ {context}");
    eprintln!("   Error: {error}");
    error.exit_code()
}

fn print_summary(summary: &ExportSummary) {
    println!("📊 Export Summary:");
    println!("  Bucket: {}", summary.bucket);
    println!("  Date Range: {} to {}", summary.start_date, summary.end_date);
    println!("  Destination: {}", summary.destination);
    for split in &summary.splits {
        println!(
            "  {}: {} windows ({} days)",
            split.split, split.windows, split.days
        );
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if summary.dry_run {
        println!("✅ Dry run complete, nothing was submitted");
        return;
    }

    println!("Jobs:");
    for job in &summary.jobs {
        println!("  - {job}");
    }
    println!();
    println!("✅ Export submitted; the platform runs the jobs asynchronously");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ExportArgs {
        ExportArgs {
            bucket: Some("my-bucket".to_string()),
            start_date: Some("2020-01-01".to_string()),
            end_date: Some("2021-01-01".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = NdwsConfig::default();
        config.export.bucket = Some("from-file".to_string());
        config.dataset.kernel_size = 32;

        let args = ExportArgs {
            kernel_size: Some(128),
            dry_run: true,
            ..args()
        };
        args.apply_overrides(&mut config);

        assert_eq!(config.export.bucket.as_deref(), Some("my-bucket"));
        assert_eq!(config.dataset.kernel_size, 128);
        assert!(config.application.dry_run);
    }

    #[test]
    fn test_file_values_used_without_flags() {
        let mut config = NdwsConfig::default();
        config.export.bucket = Some("from-file".to_string());
        config.export.start_date = Some("2020-06-01".to_string());
        config.export.end_date = Some("2020-07-01".to_string());

        let args = ExportArgs::default();
        args.apply_overrides(&mut config);

        let request = args.build_request(&config).unwrap();
        assert_eq!(request.bucket().as_str(), "from-file");
        assert_eq!(request.date_range().num_days(), 31);
    }

    #[test]
    fn test_build_request_rejects_reversed_dates() {
        let mut config = NdwsConfig::default();
        let args = ExportArgs {
            start_date: Some("2021-01-01".to_string()),
            end_date: Some("2020-01-01".to_string()),
            ..args()
        };
        args.apply_overrides(&mut config);

        let err = args.build_request(&config).unwrap_err();
        assert_eq!(err.exit_code(), crate::domain::errors::EXIT_INVALID_INPUT);
    }

    #[test]
    fn test_build_request_rejects_bad_kernel_override() {
        let mut config = NdwsConfig::default();
        let args = ExportArgs {
            kernel_size: Some(4),
            ..args()
        };
        args.apply_overrides(&mut config);

        match args.build_request(&config).unwrap_err() {
            NdwsError::InvalidArgument { parameter, .. } => assert_eq!(parameter, "kernel_size"),
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }
}
