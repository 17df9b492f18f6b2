//! Export orchestration
//!
//! This module provides the core export logic for ndws:
//! - Submission of the export request through the platform adapter
//! - Summary and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use summary::{ExportSummary, SplitSummary};
