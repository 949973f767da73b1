//! Message signature verification
//!
//! Checks the signature version, fetches the signing certificate from an
//! origin-validated URL, parses it and verifies RSA PKCS#1 v1.5 over SHA-1
//! against the canonical signed bytes.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha1::{Digest, Sha1};
use x509_cert::der::{Decode, Encode};
use x509_cert::Certificate;

use crate::config::VerifierConfig;
use crate::error::VerifyError;
use crate::fetch::Fetch;
use crate::message::MessageSignature;
use crate::origin::TrustedCertUrl;

/// Verifies that a message signature was produced by the certificate at a
/// trusted URL.
pub trait MessageVerifier: Send + Sync {
    /// Verify `signature`, fetching the certificate from `cert_url`.
    fn verify(&self, signature: &MessageSignature, cert_url: &TrustedCertUrl)
        -> Result<(), VerifyError>;
}

/// Production verifier for provider signature version 1 (RSA with SHA-1).
///
/// Holds only read-only configuration and the fetch capability; every call
/// performs exactly one certificate fetch and nothing is cached.
pub struct SnsSignatureVerifier {
    fetcher: Arc<dyn Fetch>,
    signature_version: String,
}

impl SnsSignatureVerifier {
    pub fn new(config: &VerifierConfig, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            fetcher,
            signature_version: config.signature_version.clone(),
        }
    }
}

impl MessageVerifier for SnsSignatureVerifier {
    fn verify(
        &self,
        signature: &MessageSignature,
        cert_url: &TrustedCertUrl,
    ) -> Result<(), VerifyError> {
        if signature.signature_version != self.signature_version {
            return Err(VerifyError::UnsupportedSignatureVersion(
                signature.signature_version.clone(),
            ));
        }

        let claimed = STANDARD.decode(signature.signature.as_bytes())?;

        let response = self.fetcher.get(cert_url.as_str())?;
        let public_key = parse_certificate_key(&response.body)?;

        let digest = Sha1::digest(&signature.signed);
        public_key
            .verify(Pkcs1v15Sign::new::<Sha1>(), &digest, &claimed)
            .map_err(|_| VerifyError::InvalidSignature)
    }
}

/// Extract the RSA public key from a PEM-encoded X.509 certificate.
///
/// A body without a PEM block is `InvalidCertificateBody`; a PEM block that is
/// not a well-formed certificate is `MalformedCertificate`. A well-formed
/// certificate carrying a non-RSA key can never verify and is reported as
/// `InvalidSignature`.
fn parse_certificate_key(body: &[u8]) -> Result<RsaPublicKey, VerifyError> {
    let block = pem::parse(body).map_err(|_| VerifyError::InvalidCertificateBody)?;

    let certificate = Certificate::from_der(block.contents())
        .map_err(|e| VerifyError::MalformedCertificate(e.to_string()))?;

    let spki = certificate
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .map_err(|e| VerifyError::MalformedCertificate(e.to_string()))?;

    RsaPublicKey::from_public_key_der(&spki).map_err(|_| VerifyError::InvalidSignature)
}
