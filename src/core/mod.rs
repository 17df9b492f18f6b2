//! Core business logic for ndws.
//!
//! # Modules
//!
//! - [`export`] - Export coordination and reporting
//!
//! # Export Workflow
//!
//! 1. **Build**: Validate the parameters into an [`ExportRequest`](crate::domain::ExportRequest),
//!    planning the train/eval/test split
//! 2. **Submit**: Send the request to the platform exactly once (skipped in dry-run mode)
//! 3. **Report**: Summarize the acknowledged jobs
//!
//! # Example
//!
//! ```rust,no_run
//! use ndws::config::load_config;
//! use ndws::core::export::ExportCoordinator;
//! use ndws::domain::ExportRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ndws.toml")?;
//! let request = ExportRequest::builder()
//!     .bucket("my-bucket")
//!     .start_date("2020-01-01")
//!     .end_date("2021-01-01")
//!     .dataset(config.dataset.to_spec()?)
//!     .build()?;
//!
//! let coordinator = ExportCoordinator::from_config(&config)?;
//! let summary = coordinator.execute_export(&request).await?;
//!
//! println!("Submitted {} jobs", summary.jobs.len());
//! # Ok(())
//! # }
//! ```

pub mod export;
