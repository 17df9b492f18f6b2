//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::NdwsConfig;
use super::secret::secret_string;
use crate::domain::errors::NdwsError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Configuration file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "ndws.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into NdwsConfig
/// 4. Applies environment variable overrides (NDWS_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a `Configuration` error if the file cannot be read or parsed, a
/// referenced environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use ndws::config::loader::load_config;
///
/// let config = load_config("ndws.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<NdwsConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(NdwsError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        NdwsError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: NdwsConfig = toml::from_str(&contents)
        .map_err(|e| NdwsError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(config)
}

/// Loads configuration, falling back to defaults when no file is present
///
/// An explicitly requested file must exist. Without one, `ndws.toml` in the
/// working directory is used if present, otherwise the built-in defaults.
/// Environment overrides and validation apply in every case.
///
/// # Errors
///
/// Same as [`load_config`].
pub fn load_config_or_default(path: Option<&Path>) -> Result<NdwsConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            finish(NdwsConfig::default())
        }
    }
}

fn finish(mut config: NdwsConfig) -> Result<NdwsConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        NdwsError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged. Every missing variable is reported in
/// a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| NdwsError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(NdwsError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Reads `key` from the environment and parses it into `target`
fn env_override<T>(key: &str, target: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(val) = std::env::var(key) {
        *target = val
            .trim()
            .parse()
            .map_err(|e| NdwsError::Configuration(format!("Invalid value for {key}: {e}")))?;
    }
    Ok(())
}

/// Applies environment variable overrides using NDWS_* prefix
///
/// Environment variables follow the pattern: NDWS_<SECTION>_<KEY>
/// For example: NDWS_PLATFORM_BASE_URL, NDWS_EXPORT_BUCKET
fn apply_env_overrides(config: &mut NdwsConfig) -> Result<()> {
    // Application overrides
    env_override("NDWS_APPLICATION_LOG_LEVEL", &mut config.application.log_level)?;
    env_override("NDWS_APPLICATION_DRY_RUN", &mut config.application.dry_run)?;

    // Platform overrides
    env_override("NDWS_PLATFORM_VENDOR", &mut config.platform.vendor)?;
    env_override("NDWS_PLATFORM_BASE_URL", &mut config.platform.base_url)?;
    env_override("NDWS_PLATFORM_PROJECT", &mut config.platform.project)?;
    env_override("NDWS_PLATFORM_AUTH_TYPE", &mut config.platform.auth_type)?;
    if let Ok(val) = std::env::var("NDWS_PLATFORM_ACCESS_TOKEN") {
        config.platform.access_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("NDWS_PLATFORM_USERNAME") {
        config.platform.username = Some(val);
    }
    if let Ok(val) = std::env::var("NDWS_PLATFORM_PASSWORD") {
        config.platform.password = Some(secret_string(val));
    }
    env_override("NDWS_PLATFORM_TIMEOUT_SECONDS", &mut config.platform.timeout_seconds)?;
    env_override("NDWS_PLATFORM_TLS_VERIFY", &mut config.platform.tls_verify)?;

    // Export overrides
    if let Ok(val) = std::env::var("NDWS_EXPORT_BUCKET") {
        config.export.bucket = Some(val);
    }
    if let Ok(val) = std::env::var("NDWS_EXPORT_START_DATE") {
        config.export.start_date = Some(val);
    }
    if let Ok(val) = std::env::var("NDWS_EXPORT_END_DATE") {
        config.export.end_date = Some(val);
    }
    env_override("NDWS_EXPORT_FILE_NAME_PREFIX", &mut config.export.file_name_prefix)?;

    // Dataset overrides
    env_override("NDWS_DATASET_KERNEL_SIZE", &mut config.dataset.kernel_size)?;
    env_override("NDWS_DATASET_SAMPLING_SCALE", &mut config.dataset.sampling_scale)?;
    env_override(
        "NDWS_DATASET_NUM_SAMPLES_PER_FILE",
        &mut config.dataset.num_samples_per_file,
    )?;
    if let Ok(val) = std::env::var("NDWS_DATASET_FEATURES") {
        config.dataset.features = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }
    env_override("NDWS_DATASET_LABEL", &mut config.dataset.label)?;
    env_override(
        "NDWS_DATASET_WINDOW_LENGTH_DAYS",
        &mut config.dataset.window_length_days,
    )?;
    env_override(
        "NDWS_DATASET_EVAL_SPLIT_RATIO",
        &mut config.dataset.eval_split_ratio,
    )?;
    env_override("NDWS_DATASET_SEED", &mut config.dataset.seed)?;

    // Logging overrides
    env_override("NDWS_LOGGING_LOCAL_ENABLED", &mut config.logging.local_enabled)?;
    env_override("NDWS_LOGGING_LOCAL_PATH", &mut config.logging.local_path)?;
    env_override("NDWS_LOGGING_LOCAL_ROTATION", &mut config.logging.local_rotation)?;

    Ok(())
}
