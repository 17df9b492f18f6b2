//! Domain error types
//!
//! This module defines the error hierarchy for ndws. Errors fall into two
//! families: invalid arguments, which are detected locally before anything is
//! sent to the export platform, and platform errors, which are surfaced as the
//! platform reported them. Neither family is retried.
//!
//! No third-party error types are exposed from this module.

use thiserror::Error;

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for invalid arguments or configuration
pub const EXIT_INVALID_INPUT: i32 = 2;

/// Exit code when the platform rejected the request (auth, quota, bad request)
pub const EXIT_PLATFORM_REJECTED: i32 = 3;

/// Exit code when the platform could not be reached
pub const EXIT_PLATFORM_UNREACHABLE: i32 = 4;

/// Exit code for any other fatal error
pub const EXIT_FATAL: i32 = 5;

/// Main ndws error type
#[derive(Debug, Error)]
pub enum NdwsError {
    /// A required parameter is missing or malformed
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument { parameter: String, reason: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors reported by, or while talking to, the export platform
    #[error("Export platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl NdwsError {
    /// Creates an invalid-argument error for the named parameter
    pub fn invalid_argument(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        NdwsError::InvalidArgument {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error was raised before contacting the platform
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            NdwsError::InvalidArgument { .. } | NdwsError::Configuration(_)
        )
    }

    /// Maps the error to the process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            NdwsError::InvalidArgument { .. } | NdwsError::Configuration(_) => EXIT_INVALID_INPUT,
            NdwsError::Platform(e) if e.is_unreachable() => EXIT_PLATFORM_UNREACHABLE,
            NdwsError::Platform(_) => EXIT_PLATFORM_REJECTED,
            NdwsError::Serialization(_) | NdwsError::Io(_) | NdwsError::Other(_) => EXIT_FATAL,
        }
    }
}

/// Export platform errors
///
/// Errors that occur when submitting an export job. These do not expose the
/// HTTP client's types.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to connect to the platform
    #[error("Failed to connect to export platform: {0}")]
    ConnectionFailed(String),

    /// Credentials were missing, invalid or lacked permission
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The platform refused the job because of quota or rate limits
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Client error (4xx) other than authentication and quota
    #[error("Export request rejected: {status} - {message}")]
    Rejected { status: u16, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// The platform answered with something that is not an acknowledgment
    #[error("Invalid response from platform: {0}")]
    InvalidResponse(String),
}

impl PlatformError {
    /// Returns true if the platform could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            PlatformError::ConnectionFailed(_) | PlatformError::Timeout(_)
        )
    }

    /// Classifies a non-success HTTP status into a platform error
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => PlatformError::AuthenticationFailed(format!("HTTP {status}: {message}")),
            429 => PlatformError::QuotaExceeded(message),
            400..=499 => PlatformError::Rejected { status, message },
            _ => PlatformError::ServerError { status, message },
        }
    }
}

impl From<std::io::Error> for NdwsError {
    fn from(err: std::io::Error) -> Self {
        NdwsError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for NdwsError {
    fn from(err: serde_json::Error) -> Self {
        NdwsError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for NdwsError {
    fn from(err: toml::de::Error) -> Self {
        NdwsError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display_names_parameter() {
        let err = NdwsError::invalid_argument("start_date", "must be before end_date");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'start_date': must be before end_date"
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_platform_error_conversion() {
        let err: NdwsError = PlatformError::ConnectionFailed("refused".to_string()).into();
        assert!(matches!(err, NdwsError::Platform(_)));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            NdwsError::invalid_argument("bucket", "empty").exit_code(),
            EXIT_INVALID_INPUT
        );
        assert_eq!(
            NdwsError::Configuration("bad".to_string()).exit_code(),
            EXIT_INVALID_INPUT
        );
        assert_eq!(
            NdwsError::from(PlatformError::AuthenticationFailed("no".to_string())).exit_code(),
            EXIT_PLATFORM_REJECTED
        );
        assert_eq!(
            NdwsError::from(PlatformError::Timeout("30s".to_string())).exit_code(),
            EXIT_PLATFORM_UNREACHABLE
        );
        assert_eq!(NdwsError::Io("disk".to_string()).exit_code(), EXIT_FATAL);
    }

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            PlatformError::from_status(401, "bad token"),
            PlatformError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            PlatformError::from_status(403, "forbidden"),
            PlatformError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            PlatformError::from_status(429, "slow down"),
            PlatformError::QuotaExceeded(_)
        ));
        assert!(matches!(
            PlatformError::from_status(400, "bad"),
            PlatformError::Rejected { status: 400, .. }
        ));
        assert!(matches!(
            PlatformError::from_status(503, "down"),
            PlatformError::ServerError { status: 503, .. }
        ));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: NdwsError = io_err.into();
        assert!(matches!(err, NdwsError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: NdwsError = toml_err.into();
        assert!(matches!(err, NdwsError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: NdwsError = json_err.into();
        assert!(matches!(err, NdwsError::Serialization(_)));
    }
}
