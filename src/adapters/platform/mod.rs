//! Export platform adapter
//!
//! This module provides the integration with the external geospatial
//! platform: the submission trait, its REST implementation, the client
//! factory and the wire models.

pub mod client;
pub mod models;
pub mod vendor;

pub use client::PlatformClient;
pub use models::{ExportJobRequest, ExportJobResponse};
pub use vendor::{ExportPlatform, RestPlatform};
