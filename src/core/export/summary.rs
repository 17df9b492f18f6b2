//! Export summary and reporting
//!
//! This module defines the structure reported to the user after an export
//! has been submitted (or planned, in dry-run mode).

use crate::domain::{ExportRequest, JobHandle, Split};
use serde::Serialize;
use std::time::Duration;

/// Window and day counts of one split
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    pub split: Split,
    pub windows: usize,
    pub days: i64,
}

/// Summary of an export operation
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Destination bucket
    pub bucket: String,

    /// First exported day
    pub start_date: String,

    /// Last exported day
    pub end_date: String,

    /// Destination of the output objects
    pub destination: String,

    /// Per-split window counts
    pub splits: Vec<SplitSummary>,

    /// Jobs the platform acknowledged (empty in dry-run mode)
    pub jobs: Vec<JobHandle>,

    /// Whether the platform was contacted
    pub dry_run: bool,

    /// Duration of the submission
    #[serde(serialize_with = "serialize_duration_ms", rename = "duration_ms")]
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a summary echoing the request, with no jobs yet
    pub fn new(request: &ExportRequest, dry_run: bool) -> Self {
        let plan = request.splits();
        let splits = plan
            .splits()
            .map(|(split, windows)| SplitSummary {
                split,
                windows: windows.len(),
                days: windows.iter().map(|w| w.num_days()).sum(),
            })
            .collect();

        Self {
            bucket: request.bucket().to_string(),
            start_date: request.date_range().start().to_string(),
            end_date: request.date_range().end().to_string(),
            destination: request.destination_uri(),
            splits,
            jobs: Vec::new(),
            dry_run,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the acknowledged jobs
    pub fn with_jobs(mut self, jobs: Vec<JobHandle>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Check if the platform accepted the export
    pub fn is_successful(&self) -> bool {
        self.dry_run || !self.jobs.is_empty()
    }

    /// Total number of day windows across splits
    pub fn total_windows(&self) -> usize {
        self.splits.iter().map(|s| s.windows).sum()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            bucket = %self.bucket,
            start_date = %self.start_date,
            end_date = %self.end_date,
            windows = self.total_windows(),
            jobs = self.jobs.len(),
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            "Export summary"
        );

        for job in &self.jobs {
            tracing::info!(job_id = %job.id, state = %job.state, "Export job acknowledged");
        }
    }
}

fn serialize_duration_ms<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobId, JobState};

    fn request() -> ExportRequest {
        ExportRequest::builder()
            .bucket("my-bucket")
            .start_date("2020-01-01")
            .end_date("2020-12-31")
            .build()
            .unwrap()
    }

    fn job(id: &str) -> JobHandle {
        JobHandle {
            id: JobId::new(id).unwrap(),
            description: String::new(),
            state: JobState::Ready,
        }
    }

    #[test]
    fn test_summary_echoes_request() {
        let summary = ExportSummary::new(&request(), false);

        assert_eq!(summary.bucket, "my-bucket");
        assert_eq!(summary.start_date, "2020-01-01");
        assert_eq!(summary.end_date, "2020-12-31");
        assert_eq!(summary.total_windows(), 46);
        assert_eq!(summary.splits[0].split, Split::Train);

        let days: i64 = summary.splits.iter().map(|s| s.days).sum();
        assert_eq!(days, 366);
    }

    #[test]
    fn test_summary_success() {
        let summary = ExportSummary::new(&request(), false);
        assert!(!summary.is_successful());

        let summary = summary.with_jobs(vec![job("JOB_1")]);
        assert!(summary.is_successful());

        assert!(ExportSummary::new(&request(), true).is_successful());
    }

    #[test]
    fn test_summary_serializes_duration_in_ms() {
        let summary = ExportSummary::new(&request(), true)
            .with_duration(Duration::from_millis(1500));
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["duration_ms"], 1500);
        assert_eq!(json["dry_run"], true);
        assert_eq!(json["splits"][0]["split"], "train");
    }
}
