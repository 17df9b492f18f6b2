//! Domain models and types for ndws.
//!
//! This module contains the request model and business rules of an export:
//! validated identifiers, date ranges, the dataset's feature channels, the
//! train/eval/test split plan and the error types shared by every layer.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Validated identifiers** ([`BucketName`], [`JobId`])
//! - **Request model** ([`ExportRequest`], [`DatasetSpec`], [`DateRange`], [`SplitPlan`])
//! - **Platform acknowledgements** ([`JobHandle`])
//! - **Error types** ([`NdwsError`], [`PlatformError`])
//! - **Result type alias** ([`Result`])
//!
//! # Builder Pattern
//!
//! Export requests can only be created through the validating builder, so an
//! invalid request never reaches the platform:
//!
//! ```rust
//! use ndws::domain::{ExportRequest, NdwsError};
//!
//! let err = ExportRequest::builder()
//!     .bucket("my-bucket")
//!     .start_date("2021-01-01")
//!     .end_date("2020-01-01")
//!     .build()
//!     .unwrap_err();
//!
//! assert!(matches!(err, NdwsError::InvalidArgument { .. }));
//! ```

pub mod dates;
pub mod errors;
pub mod features;
pub mod ids;
pub mod job;
pub mod request;
pub mod result;
pub mod split;

// Re-export commonly used types for convenience
pub use dates::{DateRange, DateWindow};
pub use errors::{NdwsError, PlatformError};
pub use features::Feature;
pub use ids::{BucketName, JobId};
pub use job::{JobHandle, JobState};
pub use request::{DatasetSpec, ExportRequest, ExportRequestBuilder};
pub use result::Result;
pub use split::{plan_splits, Split, SplitPlan};
