//! Export platform API models
//!
//! Request and response bodies of the platform's export endpoint. These are
//! kept apart from the domain model so the wire format can change without
//! touching [`ExportRequest`].

use crate::domain::{
    DateWindow, ExportRequest, Feature, JobHandle, PlatformError, Result, Split,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/projects/{project}/exports`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportJobRequest {
    pub bucket: String,
    pub start_date: String,
    pub end_date: String,
    pub file_name_prefix: String,
    pub file_format: String,
    pub dataset: DatasetParameters,
    pub splits: Vec<SplitWindows>,
}

/// Sampling parameters of the export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetParameters {
    pub kernel_size: u32,
    pub sampling_scale: u32,
    pub num_samples_per_file: u32,
    pub features: Vec<Feature>,
    pub label: Feature,
}

/// Day windows of one split
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitWindows {
    pub name: Split,
    pub windows: Vec<DateWindow>,
}

impl From<&ExportRequest> for ExportJobRequest {
    fn from(request: &ExportRequest) -> Self {
        let dataset = request.dataset();

        Self {
            bucket: request.bucket().to_string(),
            start_date: request.date_range().start().to_string(),
            end_date: request.date_range().end().to_string(),
            file_name_prefix: request.file_name_prefix().to_string(),
            file_format: dataset.file_format.clone(),
            dataset: DatasetParameters {
                kernel_size: dataset.kernel_size,
                sampling_scale: dataset.sampling_scale,
                num_samples_per_file: dataset.num_samples_per_file,
                features: dataset.features.clone(),
                label: dataset.label,
            },
            splits: request
                .splits()
                .splits()
                .map(|(name, windows)| SplitWindows {
                    name,
                    windows: windows.to_vec(),
                })
                .collect(),
        }
    }
}

/// Successful response of the export endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ExportJobResponse {
    #[serde(default)]
    pub jobs: Vec<JobHandle>,
}

/// Error body some platforms return alongside a non-success status
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Detail of an [`ErrorResponse`]
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl ExportJobResponse {
    /// Parses a response body
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidResponse` if the body is not a job list.
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| {
            PlatformError::InvalidResponse(format!("Failed to parse export response: {e}")).into()
        })
    }
}

/// Extracts the most useful message from an error body
///
/// Structured `{"error": {"message": ...}}` bodies yield their message; any
/// other body is returned trimmed.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) => match response.error.status {
            Some(status) => format!("{status}: {}", response.error.message),
            None => response.error.message,
        },
        Err(_) => body.trim().to_string(),
    }
}
