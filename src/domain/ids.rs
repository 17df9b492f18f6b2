//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that cross the platform boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const GCS_SCHEME: &str = "gs://";

/// Destination storage bucket name
///
/// The bucket is where the platform writes the exported examples. A leading
/// `gs://` is accepted and stripped so that both `my-bucket` and
/// `gs://my-bucket` name the same bucket.
///
/// # Examples
///
/// ```
/// use ndws::domain::ids::BucketName;
/// use std::str::FromStr;
///
/// let bucket = BucketName::from_str("gs://my-bucket").unwrap();
/// assert_eq!(bucket.as_str(), "my-bucket");
/// assert!(BucketName::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BucketName(String);

impl BucketName {
    /// Creates a new BucketName
    ///
    /// # Returns
    ///
    /// Returns `Err` with the reason if the name is empty, contains
    /// whitespace, or contains a path separator.
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        let trimmed = name.trim();
        let trimmed = trimmed.strip_prefix(GCS_SCHEME).unwrap_or(trimmed);

        if trimmed.is_empty() {
            return Err("bucket name cannot be empty".to_string());
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(format!("bucket name '{trimmed}' cannot contain whitespace"));
        }
        if trimmed.contains('/') {
            return Err(format!(
                "bucket name '{trimmed}' cannot contain '/'; use --prefix for folders"
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the bucket name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `gs://` URI of the bucket
    pub fn uri(&self) -> String {
        format!("{GCS_SCHEME}{}", self.0)
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BucketName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for BucketName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BucketName> for String {
    fn from(bucket: BucketName) -> Self {
        bucket.0
    }
}

impl AsRef<str> for BucketName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier the platform assigned to a submitted export job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobId(String);

impl JobId {
    /// Creates a new JobId
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Job ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the job ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for JobId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JobId> for String {
    fn from(id: JobId) -> Self {
        id.0
    }
}
