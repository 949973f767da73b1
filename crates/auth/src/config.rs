//! Verifier configuration
//!
//! Trust settings are an explicit, immutable value handed to the validator and
//! verifier at construction time.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Scheme certificate URLs must use.
pub const DEFAULT_CERT_URL_SCHEME: &str = "https";

/// Provider certificate hosts: region-qualified `sns.<region>.amazonaws.com`
/// and the China partition `sns.<region>.amazonaws.com.cn`.
pub const DEFAULT_CERT_HOST_PATTERN: &str = r"^sns\.[a-zA-Z0-9\-]{3,}\.amazonaws\.com(\.cn)?$";

/// The only signature scheme version the provider defines for RSA/SHA-1.
pub const DEFAULT_SIGNATURE_VERSION: &str = "1";

/// Trust settings for certificate origin validation and signature checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Required scheme of the signing-certificate URL
    pub cert_url_scheme: String,

    /// Regular expression the certificate host must match
    pub cert_host_pattern: String,

    /// Accepted `SignatureVersion` value
    pub signature_version: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            cert_url_scheme: DEFAULT_CERT_URL_SCHEME.to_string(),
            cert_host_pattern: DEFAULT_CERT_HOST_PATTERN.to_string(),
            signature_version: DEFAULT_SIGNATURE_VERSION.to_string(),
        }
    }
}

impl VerifierConfig {
    /// Check that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cert_url_scheme.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "cert_url_scheme".to_string(),
            });
        }
        if self.signature_version.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "signature_version".to_string(),
            });
        }
        self.host_regex().map(|_| ())
    }

    pub(crate) fn host_regex(&self) -> Result<regex::Regex, ConfigError> {
        if self.cert_host_pattern.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "cert_host_pattern".to_string(),
            });
        }
        regex::Regex::new(&self.cert_host_pattern).map_err(|e| ConfigError::InvalidValue {
            key: "cert_host_pattern".to_string(),
            reason: e.to_string(),
        })
    }
}
