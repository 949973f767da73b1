//! Gateway configuration
//!
//! Settings come from an optional TOML file, then `SNSGUARD_*` environment
//! variables, then command-line flags, each layer overriding the previous one.

use serde::{Deserialize, Serialize};
use snsguard_auth::VerifierConfig;
use std::env;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const ENV_TOPIC_ARN: &str = "SNSGUARD_TOPIC_ARN";
pub const ENV_BIND_ADDRESS: &str = "SNSGUARD_BIND_ADDRESS";
pub const ENV_PORT: &str = "SNSGUARD_PORT";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("IO error reading config file: {message}")]
    IoError { message: String },

    #[error("Configuration parsing error: {message}")]
    ParseError { message: String },

    #[error(transparent)]
    Verifier(#[from] snsguard_auth::ConfigError),
}

/// Webhook gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Address to bind the listener to
    pub bind_address: String,
    /// Port to listen on
    pub port: u16,
    /// Route the provider pushes to
    pub path: String,
    /// The single topic this endpoint accepts
    pub topic_arn: Option<String>,
    /// Largest request body accepted
    pub max_body_bytes: usize,
    /// Deadline for certificate and confirmation fetches
    #[serde(with = "humantime_serde")]
    pub fetch_timeout: Duration,
    /// Certificate origin and signature settings
    pub verifier: VerifierConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            path: "/sns".to_string(),
            topic_arn: None,
            max_body_bytes: snsguard_auth::http_layer::DEFAULT_MAX_BODY_BYTES,
            fetch_timeout: Duration::from_secs(10),
            verifier: VerifierConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }

    /// Apply `SNSGUARD_*` environment overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(topic_arn) = env::var(ENV_TOPIC_ARN) {
            self.topic_arn = Some(topic_arn);
        }

        if let Ok(bind_address) = env::var(ENV_BIND_ADDRESS) {
            self.bind_address = bind_address;
        }

        if let Ok(port) = env::var(ENV_PORT) {
            self.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PORT.to_string(),
                reason: format!("Invalid port number: {}", port),
            })?;
        }

        Ok(())
    }

    /// The configured topic, or an error when none was given.
    pub fn require_topic_arn(&self) -> Result<&str, ConfigError> {
        match self.topic_arn.as_deref() {
            Some(topic) if !topic.trim().is_empty() => Ok(topic),
            _ => Err(ConfigError::MissingRequired {
                key: "topic_arn".to_string(),
            }),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.require_topic_arn()?;

        if !self.path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                key: "path".to_string(),
                reason: "must start with '/'".to_string(),
            });
        }

        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_body_bytes".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        self.verifier.validate()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
