pub mod check_cert_url;
pub mod serve;

use clap::ArgMatches;
use thiserror::Error;

use crate::config::{ConfigError, GatewayConfig};

/// Failures surfaced by the command-line entry points
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Verifier(#[from] snsguard_auth::ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] snsguard_auth::TransportError),

    #[error("Untrusted certificate URL: {0}")]
    Untrusted(#[from] snsguard_auth::OriginError),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Failed to bind to address {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load the file named by `--config` (if any), then apply environment
/// overrides. Values from a `.env` file in the working directory count as
/// environment.
pub fn load_config(matches: &ArgMatches) -> Result<GatewayConfig, ConfigError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!("Ignoring unreadable .env file: {}", e);
        }
    }

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path);
            GatewayConfig::from_file(path)?
        }
        None => GatewayConfig::default(),
    };
    config.apply_env()?;
    Ok(config)
}
