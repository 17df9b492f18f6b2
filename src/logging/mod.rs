//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output on stderr
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use ndws::logging::init_logging;
//! use ndws::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(bucket = "my-bucket", "Export requested");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export submission
///
/// # Example
///
/// ```no_run
/// use ndws::domain::ExportRequest;
/// use ndws::log_export_start;
///
/// let request = ExportRequest::builder()
///     .bucket("my-bucket")
///     .start_date("2020-01-01")
///     .end_date("2021-01-01")
///     .build()
///     .unwrap();
/// log_export_start!(request.bucket(), request.date_range());
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($bucket:expr, $date_range:expr) => {
        tracing::info!(
            bucket = %$bucket,
            date_range = %$date_range,
            "Starting export"
        );
    };
}

/// Log the platform's acknowledgement of an export
///
/// # Example
///
/// ```no_run
/// use ndws::log_export_submitted;
/// use std::time::Duration;
///
/// log_export_submitted!(3, Duration::from_millis(420));
/// ```
#[macro_export]
macro_rules! log_export_submitted {
    ($job_count:expr, $duration:expr) => {
        tracing::info!(
            jobs = $job_count,
            duration_ms = $duration.as_millis() as u64,
            "Export submitted"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use ndws::log_error_with_context;
/// use ndws::domain::NdwsError;
///
/// let error = NdwsError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{ExportRequest, NdwsError};
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        let request = ExportRequest::builder()
            .bucket("my-bucket")
            .start_date("2020-01-01")
            .end_date("2020-02-01")
            .build()
            .unwrap();

        log_export_start!(request.bucket(), request.date_range());
        log_export_submitted!(1usize, Duration::from_millis(5));
        log_error_with_context!(NdwsError::Other("boom".to_string()), "test");
    }
}
