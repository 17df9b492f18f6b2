//! Export platform client factory
//!
//! Selects the [`ExportPlatform`] implementation named by `platform.vendor`.

use crate::config::PlatformConfig;
use crate::domain::{ExportRequest, JobHandle, NdwsError, Result};
use std::sync::Arc;

use super::vendor::{ExportPlatform, RestPlatform};

/// Vendors the factory can build
pub const SUPPORTED_VENDORS: &[&str] = &["rest"];

/// Export platform client that wraps a vendor implementation
pub struct PlatformClient {
    vendor: Arc<dyn ExportPlatform>,
}

impl PlatformClient {
    /// Create a new platform client from configuration
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the vendor is not supported or
    /// cannot be initialized.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ndws::adapters::platform::PlatformClient;
    /// use ndws::config::PlatformConfig;
    ///
    /// # fn example() -> ndws::domain::Result<()> {
    /// let client = PlatformClient::new(PlatformConfig::default())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: PlatformConfig) -> Result<Self> {
        let vendor_type = config.vendor.to_lowercase();

        let vendor: Arc<dyn ExportPlatform> = match vendor_type.as_str() {
            "rest" => Arc::new(RestPlatform::new(config)?),
            _ => {
                return Err(NdwsError::Configuration(format!(
                    "Unsupported export platform vendor: {vendor_type}. Supported vendors: {}",
                    SUPPORTED_VENDORS.join(", ")
                )))
            }
        };

        Ok(Self { vendor })
    }

    /// Get a reference to the underlying vendor implementation
    pub fn vendor(&self) -> &Arc<dyn ExportPlatform> {
        &self.vendor
    }

    /// Submit an export request through the vendor
    pub async fn submit_export(&self, request: &ExportRequest) -> Result<Vec<JobHandle>> {
        self.vendor.submit_export(request).await
    }
}
