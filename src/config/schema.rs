//! Configuration schema types
//!
//! This module defines the configuration structure for ndws. Every section
//! has defaults so a configuration file is optional; command-line flags are
//! applied on top of the loaded values.

use crate::config::SecretString;
use crate::domain::request::{DatasetSpec, DEFAULT_FILE_FORMAT, DEFAULT_FILE_NAME_PREFIX};
use crate::domain::{Feature, NdwsError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main ndws configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NdwsConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export platform connection
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Destination and date range of the export
    #[serde(default)]
    pub export: ExportConfig,

    /// Sampling parameters of the exported dataset
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl NdwsConfig {
    /// Validates the configuration
    ///
    /// The `[export]` values are optional here and checked when the export
    /// request is built, after command-line overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.platform.validate()?;
        self.dataset.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (plan the export without contacting the platform)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// How requests to the platform are authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// `Authorization: Bearer <access_token>`
    Bearer,
    /// `Authorization: Basic <username:password>`
    Basic,
    /// No credentials
    #[default]
    None,
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthType::Bearer => write!(f, "bearer"),
            AuthType::Basic => write!(f, "basic"),
            AuthType::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for AuthType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bearer" => Ok(AuthType::Bearer),
            "basic" => Ok(AuthType::Basic),
            "none" => Ok(AuthType::None),
            other => Err(format!(
                "Invalid auth_type '{other}'. Must be one of: bearer, basic, none"
            )),
        }
    }
}

/// Export platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Platform implementation (currently only "rest")
    #[serde(default = "default_vendor")]
    pub vendor: String,

    /// Base URL of the platform API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cloud project the export jobs run in
    #[serde(default = "default_project")]
    pub project: String,

    /// Authentication type
    #[serde(default)]
    pub auth_type: AuthType,

    /// Access token for bearer authentication
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub access_token: Option<SecretString>,

    /// Username for basic authentication
    #[serde(default)]
    pub username: Option<String>,

    /// Password for basic authentication
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// Disabling verification should only be used against local test servers.
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl PlatformConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        let valid_vendors = ["rest"];
        if !valid_vendors.contains(&self.vendor.as_str()) {
            return Err(format!(
                "Invalid platform.vendor '{}'. Must be one of: {}",
                self.vendor,
                valid_vendors.join(", ")
            ));
        }

        if self.base_url.is_empty() {
            return Err("platform.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("platform.base_url must start with http:// or https://".to_string());
        }

        if self.project.trim().is_empty() {
            return Err("platform.project cannot be empty".to_string());
        }

        match self.auth_type {
            AuthType::Bearer => {
                if self
                    .access_token
                    .as_ref()
                    .map(|t| t.expose_secret().is_empty())
                    .unwrap_or(true)
                {
                    return Err(
                        "platform.access_token cannot be empty when auth_type is 'bearer'"
                            .to_string(),
                    );
                }
            }
            AuthType::Basic => {
                if self.username.as_ref().map(|s| s.is_empty()).unwrap_or(true) {
                    return Err(
                        "platform.username cannot be empty when auth_type is 'basic'".to_string()
                    );
                }
                if self
                    .password
                    .as_ref()
                    .map(|s| s.expose_secret().is_empty())
                    .unwrap_or(true)
                {
                    return Err(
                        "platform.password cannot be empty when auth_type is 'basic'".to_string()
                    );
                }
            }
            AuthType::None => {}
        }

        if self.timeout_seconds == 0 {
            return Err("platform.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            vendor: default_vendor(),
            base_url: default_base_url(),
            project: default_project(),
            auth_type: AuthType::default(),
            access_token: None,
            username: None,
            password: None,
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
        }
    }
}

/// Export destination and date range
///
/// All values may also be given on the command line, which takes precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Destination bucket
    #[serde(default)]
    pub bucket: Option<String>,

    /// First day to export (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,

    /// Last day to export (YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<String>,

    /// Prefix of the exported files inside the bucket
    #[serde(default = "default_file_name_prefix")]
    pub file_name_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            start_date: None,
            end_date: None,
            file_name_prefix: default_file_name_prefix(),
        }
    }
}

/// Dataset sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Side length of each sampled patch in pixels (8-1024)
    #[serde(default = "default_kernel_size")]
    pub kernel_size: u32,

    /// Resolution of the sampled patches in metres per pixel (10-100000)
    #[serde(default = "default_sampling_scale")]
    pub sampling_scale: u32,

    /// Number of examples per output file (1-100000)
    #[serde(default = "default_num_samples_per_file")]
    pub num_samples_per_file: u32,

    /// Input channels
    #[serde(default = "default_features")]
    pub features: Vec<String>,

    /// Label channel
    #[serde(default = "default_label")]
    pub label: String,

    /// Length of the day windows assigned to splits
    #[serde(default = "default_window_length_days")]
    pub window_length_days: u32,

    /// Fraction of windows held out for eval, and again for test
    #[serde(default = "default_eval_split_ratio")]
    pub eval_split_ratio: f64,

    /// Seed of the split shuffle
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl DatasetConfig {
    /// Converts the configuration into a [`DatasetSpec`]
    ///
    /// Only the channel names are checked here; ranges are validated when
    /// the export request is built.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for unknown channel names.
    pub fn to_spec(&self) -> crate::domain::Result<DatasetSpec> {
        let features = Feature::parse_list(&self.features)
            .map_err(|e| NdwsError::invalid_argument("features", e))?;
        let label: Feature = self
            .label
            .parse()
            .map_err(|e: String| NdwsError::invalid_argument("label", e))?;

        Ok(DatasetSpec {
            kernel_size: self.kernel_size,
            sampling_scale: self.sampling_scale,
            num_samples_per_file: self.num_samples_per_file,
            features,
            label,
            file_format: DEFAULT_FILE_FORMAT.to_string(),
            window_length_days: self.window_length_days,
            eval_split_ratio: self.eval_split_ratio,
            seed: self.seed,
        })
    }

    fn validate(&self) -> Result<(), String> {
        match self.to_spec().and_then(|spec| spec.validate()) {
            Ok(_) => Ok(()),
            Err(NdwsError::InvalidArgument { parameter, reason }) => {
                Err(format!("dataset.{parameter} {reason}"))
            }
            Err(e) => Err(e.to_string()),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            kernel_size: default_kernel_size(),
            sampling_scale: default_sampling_scale(),
            num_samples_per_file: default_num_samples_per_file(),
            features: default_features(),
            label: default_label(),
            window_length_days: default_window_length_days(),
            eval_split_ratio: default_eval_split_ratio(),
            seed: default_seed(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory of the log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_vendor() -> String {
    "rest".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_project() -> String {
    "ndws".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_file_name_prefix() -> String {
    DEFAULT_FILE_NAME_PREFIX.to_string()
}

fn default_kernel_size() -> u32 {
    64
}

fn default_sampling_scale() -> u32 {
    1000
}

fn default_num_samples_per_file() -> u32 {
    2000
}

fn default_features() -> Vec<String> {
    Feature::default_inputs()
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_label() -> String {
    Feature::label().to_string()
}

fn default_window_length_days() -> u32 {
    8
}

fn default_eval_split_ratio() -> f64 {
    0.1
}

fn default_seed() -> u64 {
    123
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
