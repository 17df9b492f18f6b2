//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for ndws using clap.
//! Running `ndws` without a subcommand performs an export, so the short form
//! `ndws --bucket=<BUCKET> --start_date=<YYYY-MM-DD> --end_date=<YYYY-MM-DD>`
//! works as well as `ndws export ...`.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Accepted values of `--log-level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// ndws - Next Day Wildfire Spread training-data exporter
#[derive(Parser, Debug)]
#[command(name = "ndws")]
#[command(version, about, long_about = None)]
#[command(author = "ndws Contributors")]
pub struct Cli {
    /// Path to configuration file [default: ndws.toml, optional]
    #[arg(short, long, env = "NDWS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "NDWS_LOG_LEVEL",
        global = true,
        ignore_case = true,
        value_parser = LOG_LEVELS
    )]
    pub log_level: Option<String>,

    /// Export arguments used when no subcommand is given
    #[command(flatten)]
    pub export: commands::export::ExportArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit an export of training data to the platform (default)
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// The command to run, defaulting to an export
    ///
    /// Export flags given before an explicit `export` subcommand fill in any
    /// flag the subcommand leaves unset.
    pub fn into_command(self) -> (Option<PathBuf>, Commands) {
        let command = match self.command {
            None => Commands::Export(self.export),
            Some(Commands::Export(args)) => Commands::Export(args.or(self.export)),
            Some(other) => {
                if self.export != commands::export::ExportArgs::default() {
                    tracing::warn!("Export flags are ignored by this command");
                }
                other
            }
        };
        (self.config, command)
    }
}

/// Execute the parsed command line and return the process exit code
pub async fn run(cli: Cli) -> anyhow::Result<i32> {
    let (config_path, command) = cli.into_command();
    let config_path = config_path.as_deref();

    match command {
        Commands::Export(args) => args.execute(config_path).await,
        Commands::ValidateConfig(args) => args.execute(config_path).await,
        Commands::Init(args) => args.execute().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::EXIT_INVALID_INPUT;

    #[test]
    fn test_cli_parse_default_export() {
        let cli = Cli::parse_from([
            "ndws",
            "--bucket=my-bucket",
            "--start_date=2020-01-01",
            "--end_date=2021-01-01",
        ]);
        assert!(cli.command.is_none());

        let (config, command) = cli.into_command();
        assert!(config.is_none());
        match command {
            Commands::Export(args) => {
                assert_eq!(args.bucket.as_deref(), Some("my-bucket"));
                assert_eq!(args.start_date.as_deref(), Some("2020-01-01"));
                assert_eq!(args.end_date.as_deref(), Some("2021-01-01"));
            }
            other => panic!("Expected export, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_hyphenated_aliases() {
        let cli = Cli::parse_from([
            "ndws",
            "--bucket",
            "my-bucket",
            "--start-date",
            "2020-01-01",
            "--end-date",
            "2021-01-01",
        ]);
        assert_eq!(cli.export.start_date.as_deref(), Some("2020-01-01"));
        assert_eq!(cli.export.end_date.as_deref(), Some("2021-01-01"));
    }

    #[test]
    fn test_cli_parse_export_subcommand() {
        let cli = Cli::parse_from(["ndws", "export", "--bucket", "b", "--dry-run"]);
        match cli.command {
            Some(Commands::Export(args)) => {
                assert_eq!(args.bucket.as_deref(), Some("b"));
                assert!(args.dry_run);
            }
            other => panic!("Expected export subcommand, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["ndws", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Some(Commands::ValidateConfig(_))));
    }

    #[test]
    fn test_cli_parse_global_config_after_subcommand() {
        let cli = Cli::parse_from(["ndws", "export", "--config", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["ndws", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_merges_flags_given_before_export() {
        let cli = Cli::parse_from([
            "ndws",
            "--bucket=top-bucket",
            "--dry-run",
            "export",
            "--start_date=2020-01-01",
            "--end_date=2021-01-01",
        ]);

        match cli.into_command().1 {
            Commands::Export(args) => {
                assert_eq!(args.bucket.as_deref(), Some("top-bucket"));
                assert_eq!(args.start_date.as_deref(), Some("2020-01-01"));
                assert!(args.dry_run);
            }
            other => panic!("Expected export, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_subcommand_flags_win_over_top_level() {
        let cli = Cli::parse_from(["ndws", "--bucket=top", "export", "--bucket=sub"]);
        match cli.into_command().1 {
            Commands::Export(args) => assert_eq!(args.bucket.as_deref(), Some("sub")),
            other => panic!("Expected export, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_log_level() {
        let err = Cli::try_parse_from(["ndws", "--log-level", "verbose", "--bucket=b"]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INVALID_INPUT);
    }

    #[test]
    fn test_cli_log_level_ignores_case() {
        let cli = Cli::parse_from(["ndws", "--log-level", "DEBUG"]);
        assert_eq!(cli.log_level.as_deref().map(str::to_lowercase), Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["ndws", "init", "--force"]);
        assert!(matches!(cli.command, Some(Commands::Init(_))));
    }

    #[test]
    fn test_cli_rejects_bad_kernel_size_type() {
        let result = Cli::try_parse_from(["ndws", "--kernel-size", "large"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
