//! Authentication for pub/sub push notifications delivered to HTTP webhooks
//!
//! Every inbound push is checked against the trusted topic, decoded, its
//! signing-certificate URL validated against an allow-listed origin, and its
//! RSA/SHA-1 signature verified against the certificate before anything acts
//! on it. Verified subscription confirmations are completed automatically;
//! verified notifications are handed downstream through the request context.
//!
//! The core ([`Authenticator`]) is synchronous and transport-agnostic. The
//! `http-layer` feature adds an axum middleware around it.

pub mod authenticator;
pub mod canonical;
pub mod config;
pub mod confirm;
pub mod context;
pub mod error;
pub mod fetch;
pub mod message;
pub mod origin;
pub mod verify;

#[cfg(feature = "http-layer")]
pub mod http_layer;

#[cfg(test)]
mod test_support;

pub use authenticator::{Authenticated, Authenticator, MESSAGE_TYPE_HEADER, TOPIC_ARN_HEADER};
pub use config::VerifierConfig;
pub use confirm::{SubscriptionConfirmer, Verified};
pub use context::{get_notification, set_notification};
pub use error::{
    AuthError, ConfigError, ConfirmError, ContextError, DecodeError, OriginError, RejectionClass,
    TransportError, VerifyError,
};
pub use fetch::{Fetch, FetchResponse, HttpFetcher};
pub use message::{MessageAttribute, MessageSignature, MessageType, Notification, SubscriptionConfirmation};
pub use origin::{CertOriginValidator, TrustedCertUrl};
pub use verify::{MessageVerifier, SnsSignatureVerifier};

#[cfg(feature = "http-layer")]
pub use http_layer::{sns_auth_middleware, SnsLayerState, SnsNotification};
