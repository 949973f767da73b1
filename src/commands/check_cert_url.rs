use clap::ArgMatches;
use snsguard_auth::{CertOriginValidator, TrustedCertUrl};

use super::{load_config, CliError};
use crate::config::GatewayConfig;

/// Validate a signing-certificate URL against the configured origin policy
/// without fetching it.
pub fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let url = matches
        .get_one::<String>("url")
        .ok_or(CliError::MissingArgument("url"))?;
    let config = load_config(matches)?;

    match check(&config, url) {
        Ok(trusted) => {
            println!("✓ Trusted: {}", trusted);
            Ok(())
        }
        Err(CliError::Untrusted(e)) => {
            println!("✗ {}", e);
            Err(CliError::Untrusted(e))
        }
        Err(e) => Err(e),
    }
}

fn check(config: &GatewayConfig, url: &str) -> Result<TrustedCertUrl, CliError> {
    let validator = CertOriginValidator::new(&config.verifier)?;
    Ok(validator.validate(url)?)
}
