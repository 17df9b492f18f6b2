//! External system integrations for ndws.
//!
//! - [`platform`] - Export platform integration (REST job submission)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the export
//! coordinator can run against a test double:
//!
//! ```rust,no_run
//! use ndws::adapters::platform::PlatformClient;
//! use ndws::config::{AuthType, PlatformConfig, secret_string};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PlatformConfig {
//!     base_url: "https://export.example.com".to_string(),
//!     project: "fire-research".to_string(),
//!     auth_type: AuthType::Bearer,
//!     access_token: Some(secret_string("token".to_string())),
//!     ..Default::default()
//! };
//!
//! let client = PlatformClient::new(config)?;
//! # Ok(())
//! # }
//! ```

pub mod platform;
