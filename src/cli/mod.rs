//! CLI interface and argument parsing
//!
//! Exit codes:
//! - `0` success
//! - `2` configuration error
//! - `3` nothing found or invalid input
//! - `4` record store unreachable
//! - `5` case provider failure or fatal error

pub mod commands;

use crate::domain::{ErrorKind, PrefillError};
use clap::{Parser, Subcommand};

/// Dossier Prefill - learner mobility records to pre-filled Démarches Simplifiées cases
#[derive(Parser, Debug)]
#[command(name = "dossier-prefill")]
#[command(version, about, long_about = None)]
#[command(author = "Dossier Prefill Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_PATH, env = "PREFILL_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PREFILL_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find a learner's record and optionally create the pre-filled case
    Search(commands::search::SearchArgs),

    /// List institutions, for everyone or for one last name
    Institutions(commands::institutions::InstitutionsArgs),

    /// List learners leaving on a given date
    Departures(commands::departures::DeparturesArgs),

    /// Check store connectivity and provider credentials
    Check(commands::check::CheckArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Process exit code of a failed operation
pub fn exit_code(error: &PrefillError) -> i32 {
    match error.kind() {
        ErrorKind::Configuration => 2,
        ErrorKind::NotFound | ErrorKind::Validation => 3,
        ErrorKind::Connection => 4,
        ErrorKind::Provider | ErrorKind::Transport | ErrorKind::Internal => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProviderError, StoreError};

    #[test]
    fn test_cli_parse_search() {
        let cli = Cli::parse_from([
            "dossier-prefill",
            "search",
            "--name",
            "Dupont",
            "--institution",
            "EPLEFPA Toulouse",
            "--link",
        ]);
        assert_eq!(cli.config, "prefill.toml");
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.name.as_deref(), Some("Dupont"));
                assert!(args.link);
                assert!(!args.short);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["dossier-prefill", "--config", "custom.toml", "check"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["dossier-prefill", "--log-level", "debug", "institutions"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_departures_requires_date() {
        assert!(Cli::try_parse_from(["dossier-prefill", "departures"]).is_err());
        let cli = Cli::parse_from(["dossier-prefill", "departures", "--date", "01/03/2025"]);
        assert!(matches!(cli.command, Commands::Departures(_)));
    }

    #[test]
    fn test_cli_parse_validate_config_and_init() {
        let cli = Cli::parse_from(["dossier-prefill", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
        let cli = Cli::parse_from(["dossier-prefill", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&PrefillError::Configuration("x".into())), 2);
        assert_eq!(exit_code(&PrefillError::NotFound("x".into())), 3);
        assert_eq!(exit_code(&PrefillError::Validation("x".into())), 3);
        assert_eq!(
            exit_code(&StoreError::ConnectionFailed("x".into()).into()),
            4
        );
        assert_eq!(
            exit_code(&ProviderError::Transport("x".into()).into()),
            5
        );
    }
}
