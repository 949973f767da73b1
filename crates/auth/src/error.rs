//! Error types for the notification authentication pipeline
//!
//! Every stage of the pipeline has its own error enum so callers can tell a
//! forged request apart from an unreachable provider endpoint. [`AuthError`]
//! aggregates them for the orchestrator.

use thiserror::Error;

/// The request body could not be decoded into the expected payload shape.
#[derive(Debug, Error)]
#[error("Malformed notification body: {0}")]
pub struct DecodeError(#[from] pub serde_json::Error);

/// Signing-certificate URL failed origin validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OriginError {
    #[error("Invalid certificate URL: {0}")]
    InvalidCertUrl(String),

    #[error("Invalid certificate URL scheme: expected '{expected}', got '{actual}'")]
    InvalidScheme { expected: String, actual: String },

    #[error("Invalid certificate URL host: {0}")]
    InvalidHost(String),
}

/// Outbound fetch failed before a response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Signature verification failures.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Unsupported signature version: {0}")]
    UnsupportedSignatureVersion(String),

    #[error("Signature is not valid base64: {0}")]
    SignatureEncoding(#[from] base64::DecodeError),

    #[error("Failed to fetch signing certificate: {0}")]
    Fetch(#[from] TransportError),

    #[error("Invalid certificate body")]
    InvalidCertificateBody,

    #[error("Malformed X.509 certificate: {0}")]
    MalformedCertificate(String),

    /// Collapsed cryptographic rejection; the reason is intentionally not exposed.
    #[error("Invalid signature")]
    InvalidSignature,
}

/// Subscription handshake failures.
#[derive(Debug, Error)]
pub enum ConfirmError {
    #[error("Subscription confirmation rejected with status {status}")]
    Rejected { status: u16 },

    #[error("Failed to reach confirmation endpoint: {0}")]
    Transport(#[from] TransportError),
}

/// Downstream lookup of the authenticated notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("Notification not found in request context")]
    NotificationNotFound,
}

/// Invalid verifier configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Response class a rejection maps to at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionClass {
    /// The body was not a well-formed payload.
    ClientError,
    /// The request could not be authenticated.
    Forbidden,
}

/// Any failure of the authentication chain for a single request.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Topic mismatch: expected '{expected}', got '{actual}'")]
    TopicMismatch { expected: String, actual: String },

    #[error("Unexpected message type: '{0}'")]
    UnknownMessageType(String),

    #[error("Message type mismatch: header declares '{declared}', payload is '{actual}'")]
    MessageTypeMismatch { declared: String, actual: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Origin(#[from] OriginError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Confirm(#[from] ConfirmError),
}

impl AuthError {
    /// HTTP response class for this failure.
    pub fn status_class(&self) -> RejectionClass {
        match self {
            AuthError::Decode(_) => RejectionClass::ClientError,
            _ => RejectionClass::Forbidden,
        }
    }

    /// True when the request failed an authentication or origin check, as
    /// opposed to a decoding or transport problem.
    pub fn is_trust_failure(&self) -> bool {
        match self {
            AuthError::TopicMismatch { .. }
            | AuthError::UnknownMessageType(_)
            | AuthError::MessageTypeMismatch { .. }
            | AuthError::Origin(_)
            | AuthError::Confirm(ConfirmError::Rejected { .. }) => true,
            AuthError::Verify(err) => matches!(
                err,
                VerifyError::UnsupportedSignatureVersion(_)
                    | VerifyError::InvalidCertificateBody
                    | VerifyError::InvalidSignature
            ),
            AuthError::Decode(_) | AuthError::Confirm(ConfirmError::Transport(_)) => false,
        }
    }

    /// True when the failure came from the network or from malformed
    /// transport encodings (base64, X.509) rather than from a trust decision.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            AuthError::Verify(
                VerifyError::Fetch(_)
                    | VerifyError::SignatureEncoding(_)
                    | VerifyError::MalformedCertificate(_)
            ) | AuthError::Confirm(ConfirmError::Transport(_))
        )
    }

    /// Short stable label used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::TopicMismatch { .. } => "topic_mismatch",
            AuthError::UnknownMessageType(_) => "unknown_message_type",
            AuthError::MessageTypeMismatch { .. } => "message_type_mismatch",
            AuthError::Decode(_) => "decode",
            AuthError::Origin(OriginError::InvalidCertUrl(_)) => "invalid_cert_url",
            AuthError::Origin(OriginError::InvalidScheme { .. }) => "invalid_cert_url_scheme",
            AuthError::Origin(OriginError::InvalidHost(_)) => "invalid_cert_url_host",
            AuthError::Verify(VerifyError::UnsupportedSignatureVersion(_)) => {
                "unsupported_signature_version"
            }
            AuthError::Verify(VerifyError::SignatureEncoding(_)) => "signature_encoding",
            AuthError::Verify(VerifyError::Fetch(_)) => "cert_fetch",
            AuthError::Verify(VerifyError::InvalidCertificateBody) => "invalid_cert_body",
            AuthError::Verify(VerifyError::MalformedCertificate(_)) => "malformed_cert",
            AuthError::Verify(VerifyError::InvalidSignature) => "invalid_signature",
            AuthError::Confirm(ConfirmError::Rejected { .. }) => "confirm_subscription",
            AuthError::Confirm(ConfirmError::Transport(_)) => "confirm_transport",
        }
    }
}
