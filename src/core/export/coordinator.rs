//! Export coordinator - orchestrates a single export submission
//!
//! The coordinator logs the request, hands it to the platform exactly once
//! and turns the acknowledgement into an [`ExportSummary`]. In dry-run mode
//! the platform is never contacted.

use crate::adapters::platform::{ExportPlatform, PlatformClient};
use crate::config::NdwsConfig;
use crate::core::export::summary::ExportSummary;
use crate::domain::{ExportRequest, PlatformError, Result};
use crate::{log_error_with_context, log_export_start, log_export_submitted};
use std::sync::Arc;
use std::time::Instant;

/// Export coordinator
pub struct ExportCoordinator {
    platform: Arc<dyn ExportPlatform>,
    dry_run: bool,
}

impl ExportCoordinator {
    /// Create a coordinator around an existing platform implementation
    pub fn new(platform: Arc<dyn ExportPlatform>, dry_run: bool) -> Self {
        Self { platform, dry_run }
    }

    /// Create a coordinator for the platform named in the configuration
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the platform client cannot be built.
    pub fn from_config(config: &NdwsConfig) -> Result<Self> {
        let client = PlatformClient::new(config.platform.clone())?;
        Ok(Self::new(client.vendor().clone(), config.application.dry_run))
    }

    /// Whether the coordinator skips the platform call
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Execute the export
    ///
    /// Submits the request once. Nothing is retried: platform errors are
    /// returned as reported.
    ///
    /// # Errors
    ///
    /// Returns the platform's error, or `PlatformError::InvalidResponse` if
    /// the platform acknowledged no jobs.
    pub async fn execute_export(&self, request: &ExportRequest) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let summary = ExportSummary::new(request, self.dry_run);

        log_export_start!(request.bucket(), request.date_range());
        tracing::info!(
            destination = %request.destination_uri(),
            windows = request.splits().num_windows(),
            kernel_size = request.dataset().kernel_size,
            sampling_scale = request.dataset().sampling_scale,
            dry_run = self.dry_run,
            "Export request prepared"
        );

        if self.dry_run {
            tracing::info!("Dry run enabled, export not submitted");
            return Ok(summary.with_duration(start_time.elapsed()));
        }

        let jobs = match self.platform.submit_export(request).await {
            Ok(jobs) => jobs,
            Err(e) => {
                log_error_with_context!(&e, "Export submission failed");
                return Err(e);
            }
        };

        if jobs.is_empty() {
            return Err(PlatformError::InvalidResponse(
                "platform acknowledged the export but reported no jobs".to_string(),
            )
            .into());
        }

        let duration = start_time.elapsed();
        log_export_submitted!(jobs.len(), duration);

        Ok(summary.with_jobs(jobs).with_duration(duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobHandle, JobId, JobState, NdwsError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Platform double that records every submission
    struct RecordingPlatform {
        calls: Mutex<Vec<ExportRequest>>,
        response: fn() -> Result<Vec<JobHandle>>,
    }

    impl RecordingPlatform {
        fn new(response: fn() -> Result<Vec<JobHandle>>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                response,
            })
        }

        fn calls(&self) -> Vec<ExportRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExportPlatform for RecordingPlatform {
        async fn submit_export(&self, request: &ExportRequest) -> Result<Vec<JobHandle>> {
            self.calls.lock().unwrap().push(request.clone());
            (self.response)()
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn one_job() -> Result<Vec<JobHandle>> {
        Ok(vec![JobHandle {
            id: JobId::new("JOB_1").unwrap(),
            description: "ndws".to_string(),
            state: JobState::Ready,
        }])
    }

    fn no_jobs() -> Result<Vec<JobHandle>> {
        Ok(Vec::new())
    }

    fn quota_exceeded() -> Result<Vec<JobHandle>> {
        Err(PlatformError::QuotaExceeded("too many tasks".to_string()).into())
    }

    fn request() -> ExportRequest {
        ExportRequest::builder()
            .bucket("my-bucket")
            .start_date("2020-01-01")
            .end_date("2021-01-01")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_export_calls_platform_once() {
        let platform = RecordingPlatform::new(one_job);
        let coordinator = ExportCoordinator::new(platform.clone(), false);

        let summary = coordinator.execute_export(&request()).await.unwrap();

        let calls = platform.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].bucket().as_str(), "my-bucket");
        assert_eq!(calls[0].date_range().start().to_string(), "2020-01-01");
        assert_eq!(calls[0].date_range().end().to_string(), "2021-01-01");
        assert_eq!(summary.jobs.len(), 1);
        assert!(summary.is_successful());
    }

    #[tokio::test]
    async fn test_dry_run_skips_platform() {
        let platform = RecordingPlatform::new(one_job);
        let coordinator = ExportCoordinator::new(platform.clone(), true);

        let summary = coordinator.execute_export(&request()).await.unwrap();

        assert!(platform.calls().is_empty());
        assert!(summary.dry_run);
        assert!(summary.jobs.is_empty());
        assert!(summary.total_windows() > 0);
    }

    #[tokio::test]
    async fn test_platform_error_is_not_retried() {
        let platform = RecordingPlatform::new(quota_exceeded);
        let coordinator = ExportCoordinator::new(platform.clone(), false);

        let err = coordinator.execute_export(&request()).await.unwrap_err();

        assert_eq!(platform.calls().len(), 1);
        assert!(matches!(
            err,
            NdwsError::Platform(PlatformError::QuotaExceeded(_))
        ));
    }

    #[tokio::test]
    async fn test_zero_jobs_is_invalid_response() {
        let platform = RecordingPlatform::new(no_jobs);
        let coordinator = ExportCoordinator::new(platform, false);

        let err = coordinator.execute_export(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            NdwsError::Platform(PlatformError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let mut config = NdwsConfig::default();
        config.application.dry_run = true;

        let coordinator = ExportCoordinator::from_config(&config).unwrap();
        assert!(coordinator.is_dry_run());
    }
}
