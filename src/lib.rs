// ndws - Next Day Wildfire Spread training-data exporter
// Copyright (c) 2025 ndws Contributors
// Licensed under the MIT License

//! # ndws - Next Day Wildfire Spread training-data exporter
//!
//! ndws asks a remote-sensing export platform to sample fire, weather,
//! terrain and vegetation imagery over a date range and to write the
//! resulting train/eval/test files into a cloud storage bucket.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Validating** the bucket, date range and sampling parameters locally
//! - **Planning** a deterministic train/eval/test split of day windows
//! - **Submitting** a single export request to the platform
//! - **Reporting** the jobs the platform acknowledged
//!
//! The exported file layout is owned by the platform; ndws never reads or
//! writes the bucket itself.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export orchestration
//! - [`adapters`] - Export platform integration
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ndws::config::NdwsConfig;
//! use ndws::core::export::ExportCoordinator;
//! use ndws::domain::ExportRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NdwsConfig::default();
//! let request = ExportRequest::builder()
//!     .bucket("my-bucket")
//!     .start_date("2020-01-01")
//!     .end_date("2021-01-01")
//!     .build()?;
//!
//! let coordinator = ExportCoordinator::from_config(&config)?;
//! let summary = coordinator.execute_export(&request).await?;
//!
//! for job in &summary.jobs {
//!     println!("Submitted {job}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::NdwsError`]. Each error maps to
//! a process exit code through [`domain::NdwsError::exit_code`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
