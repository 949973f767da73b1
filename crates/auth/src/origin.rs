//! Signing-certificate origin validation
//!
//! A certificate URL taken from a payload is attacker-controlled until proven
//! otherwise. [`CertOriginValidator::validate`] is the only way to obtain a
//! [`TrustedCertUrl`], and the signature verifier only dereferences those.

use std::fmt;

use regex::Regex;
use url::Url;

use crate::config::VerifierConfig;
use crate::error::{ConfigError, OriginError};

/// Certificate URL that passed scheme and host checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedCertUrl(Url);

impl TrustedCertUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for TrustedCertUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Checks certificate URLs against the configured scheme and host pattern.
#[derive(Debug, Clone)]
pub struct CertOriginValidator {
    scheme: String,
    host_pattern: Regex,
}

impl CertOriginValidator {
    pub fn new(config: &VerifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scheme: config.cert_url_scheme.clone(),
            host_pattern: config.host_regex()?,
        })
    }

    /// Parse `cert_url` and check its scheme, then its host.
    ///
    /// The host is matched together with any explicit non-default port, so
    /// `sns.us-east-1.amazonaws.com:8443` does not pass the default pattern.
    pub fn validate(&self, cert_url: &str) -> Result<TrustedCertUrl, OriginError> {
        let url = Url::parse(cert_url).map_err(|e| OriginError::InvalidCertUrl(e.to_string()))?;

        if url.scheme() != self.scheme {
            return Err(OriginError::InvalidScheme {
                expected: self.scheme.clone(),
                actual: url.scheme().to_string(),
            });
        }

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };
        if !self.host_pattern.is_match(&host) {
            return Err(OriginError::InvalidHost(host));
        }

        Ok(TrustedCertUrl(url))
    }
}
