//! Export request model
//!
//! An [`ExportRequest`] is everything the platform needs to materialize the
//! dataset: where to write, which days to sample, how to sample them, and how
//! the days are split. Requests can only be created through
//! [`ExportRequestBuilder`], which validates every parameter so that an
//! invalid request never reaches the platform.

use super::dates::{parse_date, DateRange};
use super::errors::NdwsError;
use super::features::Feature;
use super::ids::BucketName;
use super::result::Result;
use super::split::{plan_splits, SplitPlan};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// File-name prefix used when none is configured
pub const DEFAULT_FILE_NAME_PREFIX: &str = "next_day_wildfire_spread";

/// Output record format
pub const DEFAULT_FILE_FORMAT: &str = "TFRecord";

/// Longest allowed split window, one leap year
pub const MAX_WINDOW_LENGTH_DAYS: u32 = 366;

/// Sampling and output parameters forwarded to the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// Side length of each sampled patch, in pixels
    pub kernel_size: u32,

    /// Resolution of the sampled patches, in metres per pixel
    pub sampling_scale: u32,

    /// Number of examples written to each output file
    pub num_samples_per_file: u32,

    /// Input channels
    pub features: Vec<Feature>,

    /// Label channel
    pub label: Feature,

    /// Output record format
    pub file_format: String,

    /// Length of the day windows assigned to splits
    pub window_length_days: u32,

    /// Fraction of windows held out for eval, and again for test
    pub eval_split_ratio: f64,

    /// Seed of the split shuffle
    pub seed: u64,
}

impl Default for DatasetSpec {
    fn default() -> Self {
        Self {
            kernel_size: 64,
            sampling_scale: 1000,
            num_samples_per_file: 2000,
            features: Feature::default_inputs(),
            label: Feature::label(),
            file_format: DEFAULT_FILE_FORMAT.to_string(),
            window_length_days: 8,
            eval_split_ratio: 0.1,
            seed: 123,
        }
    }
}

impl DatasetSpec {
    /// Validates the sampling parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the first parameter out of range.
    pub fn validate(&self) -> Result<()> {
        if !(8..=1024).contains(&self.kernel_size) {
            return Err(NdwsError::invalid_argument(
                "kernel_size",
                format!("must be between 8 and 1024, got {}", self.kernel_size),
            ));
        }

        if !(10..=100_000).contains(&self.sampling_scale) {
            return Err(NdwsError::invalid_argument(
                "sampling_scale",
                format!(
                    "must be between 10 and 100000 metres, got {}",
                    self.sampling_scale
                ),
            ));
        }

        if !(1..=100_000).contains(&self.num_samples_per_file) {
            return Err(NdwsError::invalid_argument(
                "num_samples_per_file",
                format!(
                    "must be between 1 and 100000, got {}",
                    self.num_samples_per_file
                ),
            ));
        }

        if self.features.is_empty() {
            return Err(NdwsError::invalid_argument(
                "features",
                "at least one input feature is required",
            ));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = self.features.iter().find(|f| !seen.insert(**f)) {
            return Err(NdwsError::invalid_argument(
                "features",
                format!("'{duplicate}' is listed more than once"),
            ));
        }

        if self.features.contains(&self.label) {
            return Err(NdwsError::invalid_argument(
                "features",
                format!("the label '{}' cannot also be an input feature", self.label),
            ));
        }

        if self.file_format.trim().is_empty() {
            return Err(NdwsError::invalid_argument(
                "file_format",
                "cannot be empty",
            ));
        }

        if !(1..=MAX_WINDOW_LENGTH_DAYS).contains(&self.window_length_days) {
            return Err(NdwsError::invalid_argument(
                "window_length_days",
                format!(
                    "must be between 1 and {MAX_WINDOW_LENGTH_DAYS}, got {}",
                    self.window_length_days
                ),
            ));
        }

        if !(0.0..0.5).contains(&self.eval_split_ratio) {
            return Err(NdwsError::invalid_argument(
                "eval_split_ratio",
                format!(
                    "must be in [0, 0.5), got {}",
                    self.eval_split_ratio
                ),
            ));
        }

        Ok(())
    }

    /// Every channel written to the output, inputs first and label last
    pub fn selectors(&self) -> Vec<Feature> {
        let mut selectors = self.features.clone();
        selectors.push(self.label);
        selectors
    }
}

/// Validated request to export training examples
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    bucket: BucketName,
    date_range: DateRange,
    file_name_prefix: String,
    dataset: DatasetSpec,
    splits: SplitPlan,
}

impl ExportRequest {
    /// Starts building a request
    pub fn builder() -> ExportRequestBuilder {
        ExportRequestBuilder::new()
    }

    /// Destination bucket
    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    /// Inclusive range of source days
    pub fn date_range(&self) -> &DateRange {
        &self.date_range
    }

    /// Prefix of the output objects inside the bucket
    pub fn file_name_prefix(&self) -> &str {
        &self.file_name_prefix
    }

    /// Sampling and output parameters
    pub fn dataset(&self) -> &DatasetSpec {
        &self.dataset
    }

    /// Train/eval/test assignment of the days
    pub fn splits(&self) -> &SplitPlan {
        &self.splits
    }

    /// Destination URI of the output objects
    pub fn destination_uri(&self) -> String {
        if self.file_name_prefix.is_empty() {
            self.bucket.uri()
        } else {
            format!("{}/{}", self.bucket.uri(), self.file_name_prefix)
        }
    }
}

/// Builder for [`ExportRequest`]
///
/// Raw string parameters are accepted as given on the command line and
/// validated in [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ndws::domain::ExportRequest;
///
/// let request = ExportRequest::builder()
///     .bucket("my-bucket")
///     .start_date("2020-01-01")
///     .end_date("2021-01-01")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.bucket().as_str(), "my-bucket");
/// assert_eq!(request.date_range().num_days(), 367);
/// ```
#[derive(Debug, Default)]
pub struct ExportRequestBuilder {
    bucket: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    file_name_prefix: Option<String>,
    dataset: Option<DatasetSpec>,
}

impl ExportRequestBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the destination bucket
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Sets the first day to export (`YYYY-MM-DD`)
    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Sets the last day to export (`YYYY-MM-DD`)
    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Sets the prefix of the output objects
    pub fn file_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_name_prefix = Some(prefix.into());
        self
    }

    /// Sets the sampling parameters
    pub fn dataset(mut self, dataset: DatasetSpec) -> Self {
        self.dataset = Some(dataset);
        self
    }

    /// Validates the parameters and builds the request
    ///
    /// Parameters are checked in order: bucket, start date, end date, date
    /// ordering, then the dataset spec. The first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the missing or malformed parameter.
    pub fn build(self) -> Result<ExportRequest> {
        let bucket = self
            .bucket
            .ok_or_else(|| NdwsError::invalid_argument("bucket", "--bucket is required"))?;
        let bucket = BucketName::new(bucket).map_err(|e| NdwsError::invalid_argument("bucket", e))?;

        let start_date = self.start_date.ok_or_else(|| {
            NdwsError::invalid_argument("start_date", "--start_date is required")
        })?;
        let start = parse_date("start_date", &start_date)?;

        let end_date = self
            .end_date
            .ok_or_else(|| NdwsError::invalid_argument("end_date", "--end_date is required"))?;
        let end = parse_date("end_date", &end_date)?;

        let date_range = DateRange::new(start, end)?;

        let dataset = self.dataset.unwrap_or_default();
        dataset.validate()?;

        let file_name_prefix = self
            .file_name_prefix
            .unwrap_or_else(|| DEFAULT_FILE_NAME_PREFIX.to_string())
            .trim()
            .trim_matches('/')
            .to_string();

        let splits = plan_splits(
            &date_range,
            dataset.window_length_days,
            dataset.eval_split_ratio,
            dataset.seed,
        );

        Ok(ExportRequest {
            bucket,
            date_range,
            file_name_prefix,
            dataset,
            splits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter_of(err: NdwsError) -> String {
        match err {
            NdwsError::InvalidArgument { parameter, .. } => parameter,
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }

    fn valid_builder() -> ExportRequestBuilder {
        ExportRequest::builder()
            .bucket("my-bucket")
            .start_date("2020-01-01")
            .end_date("2021-01-01")
    }

    #[test]
    fn test_build_valid_request() {
        let request = valid_builder().build().unwrap();

        assert_eq!(request.bucket().as_str(), "my-bucket");
        assert_eq!(request.date_range().start().to_string(), "2020-01-01");
        assert_eq!(request.date_range().end().to_string(), "2021-01-01");
        assert_eq!(request.file_name_prefix(), DEFAULT_FILE_NAME_PREFIX);
        assert_eq!(request.dataset(), &DatasetSpec::default());
        assert_eq!(request.splits().num_days(), 367);
        assert_eq!(
            request.destination_uri(),
            "gs://my-bucket/next_day_wildfire_spread"
        );
    }

    #[test]
    fn test_missing_bucket() {
        let err = ExportRequest::builder()
            .start_date("2020-01-01")
            .end_date("2021-01-01")
            .build()
            .unwrap_err();
        assert_eq!(parameter_of(err), "bucket");
    }

    #[test]
    fn test_empty_bucket() {
        let err = valid_builder().bucket("").build().unwrap_err();
        assert_eq!(parameter_of(err), "bucket");
    }

    #[test]
    fn test_bucket_checked_before_dates() {
        let err = ExportRequest::builder()
            .bucket(" ")
            .start_date("2021-01-01")
            .end_date("2020-01-01")
            .build()
            .unwrap_err();
        assert_eq!(parameter_of(err), "bucket");
    }

    #[test]
    fn test_missing_dates() {
        let err = ExportRequest::builder()
            .bucket("my-bucket")
            .end_date("2021-01-01")
            .build()
            .unwrap_err();
        assert_eq!(parameter_of(err), "start_date");

        let err = ExportRequest::builder()
            .bucket("my-bucket")
            .start_date("2020-01-01")
            .build()
            .unwrap_err();
        assert_eq!(parameter_of(err), "end_date");
    }

    #[test]
    fn test_reversed_dates() {
        let err = valid_builder()
            .start_date("2021-01-01")
            .end_date("2020-01-01")
            .build()
            .unwrap_err();
        assert_eq!(parameter_of(err), "start_date");
    }

    #[test]
    fn test_malformed_end_date() {
        let err = valid_builder().end_date("2021/01/01").build().unwrap_err();
        assert_eq!(parameter_of(err), "end_date");
    }

    #[test]
    fn test_prefix_is_trimmed() {
        let request = valid_builder().file_name_prefix("/ndws/2020/").build().unwrap();
        assert_eq!(request.file_name_prefix(), "ndws/2020");

        let request = valid_builder().file_name_prefix("").build().unwrap();
        assert_eq!(request.destination_uri(), "gs://my-bucket");
    }

    #[test]
    fn test_invalid_dataset_spec() {
        let dataset = DatasetSpec {
            kernel_size: 4,
            ..Default::default()
        };
        let err = valid_builder().dataset(dataset).build().unwrap_err();
        assert_eq!(parameter_of(err), "kernel_size");
    }

    #[test]
    fn test_dataset_validation_rules() {
        let mut spec = DatasetSpec::default();
        assert!(spec.validate().is_ok());

        spec.features.push(Feature::FireMask);
        assert_eq!(parameter_of(spec.validate().unwrap_err()), "features");

        let spec = DatasetSpec {
            features: vec![],
            ..Default::default()
        };
        assert_eq!(parameter_of(spec.validate().unwrap_err()), "features");

        let spec = DatasetSpec {
            eval_split_ratio: 0.5,
            ..Default::default()
        };
        assert_eq!(parameter_of(spec.validate().unwrap_err()), "eval_split_ratio");

        for window_length_days in [0, MAX_WINDOW_LENGTH_DAYS + 1, 4_000_000_000] {
            let spec = DatasetSpec {
                window_length_days,
                ..Default::default()
            };
            assert_eq!(
                parameter_of(spec.validate().unwrap_err()),
                "window_length_days"
            );
        }

        let spec = DatasetSpec {
            window_length_days: MAX_WINDOW_LENGTH_DAYS,
            ..Default::default()
        };
        assert!(spec.validate().is_ok());

        let spec = DatasetSpec {
            features: vec![Feature::WindSpeed, Feature::WindSpeed],
            ..Default::default()
        };
        assert_eq!(parameter_of(spec.validate().unwrap_err()), "features");

        let spec = DatasetSpec {
            num_samples_per_file: 0,
            ..Default::default()
        };
        assert_eq!(
            parameter_of(spec.validate().unwrap_err()),
            "num_samples_per_file"
        );
    }

    #[test]
    fn test_oversized_window_rejected_before_planning() {
        let dataset = DatasetSpec {
            window_length_days: 4_000_000_000,
            ..Default::default()
        };
        let err = valid_builder().dataset(dataset).build().unwrap_err();
        assert_eq!(parameter_of(err), "window_length_days");
    }

    #[test]
    fn test_selectors_end_with_label() {
        let spec = DatasetSpec::default();
        let selectors = spec.selectors();
        assert_eq!(selectors.len(), 13);
        assert_eq!(selectors.last(), Some(&Feature::FireMask));
    }
}
