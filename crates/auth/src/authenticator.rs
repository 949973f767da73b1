//! Authentication orchestrator
//!
//! Runs one request through the fixed chain
//! `topic → type → decode → certificate origin → signature → dispatch`,
//! stopping at the first failure. The chain is synchronous and may block on
//! the certificate and confirmation fetches.

use std::sync::Arc;

use http::HeaderMap;

use crate::config::VerifierConfig;
use crate::confirm::{SubscriptionConfirmer, Verified};
use crate::error::{AuthError, ConfigError};
use crate::fetch::Fetch;
use crate::message::{MessageSignature, MessageType, Notification, SubscriptionConfirmation};
use crate::origin::CertOriginValidator;
use crate::verify::{MessageVerifier, SnsSignatureVerifier};

/// Header carrying the topic the message was published to.
pub const TOPIC_ARN_HEADER: &str = "x-amz-sns-topic-arn";

/// Header carrying the message type.
pub const MESSAGE_TYPE_HEADER: &str = "x-amz-sns-message-type";

/// Successful outcome of [`Authenticator::authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authenticated {
    /// Verified notification, to be handed to the next stage.
    Notification(Notification),
    /// Subscription confirmed; `receipt` is the provider's response body.
    SubscriptionConfirmed { receipt: String },
    /// Verified unsubscribe confirmation. Nothing is fetched or dispatched.
    UnsubscribeConfirmed(SubscriptionConfirmation),
}

/// Authenticates pushes for a single trusted topic.
///
/// Shared across requests; holds only immutable configuration.
#[derive(Clone)]
pub struct Authenticator {
    topic_arn: String,
    origin: CertOriginValidator,
    verifier: Arc<dyn MessageVerifier>,
    confirmer: SubscriptionConfirmer,
}

impl Authenticator {
    /// Build an authenticator using the production signature verifier.
    pub fn new(
        topic_arn: impl Into<String>,
        config: &VerifierConfig,
        fetcher: Arc<dyn Fetch>,
    ) -> Result<Self, ConfigError> {
        let topic_arn = topic_arn.into();
        if topic_arn.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "topic_arn".to_string(),
            });
        }

        Ok(Self {
            topic_arn,
            origin: CertOriginValidator::new(config)?,
            verifier: Arc::new(SnsSignatureVerifier::new(config, fetcher.clone())),
            confirmer: SubscriptionConfirmer::new(fetcher),
        })
    }

    /// Replace the signature verifier
    pub fn with_verifier(mut self, verifier: Arc<dyn MessageVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }

    /// Authenticate one request from its headers and raw body.
    pub fn authenticate(&self, headers: &HeaderMap, body: &[u8]) -> Result<Authenticated, AuthError> {
        let topic = header_str(headers, TOPIC_ARN_HEADER);
        if topic != self.topic_arn {
            return Err(AuthError::TopicMismatch {
                expected: self.topic_arn.clone(),
                actual: topic.to_string(),
            });
        }

        let declared = header_str(headers, MESSAGE_TYPE_HEADER);
        let declared_type = MessageType::classify(declared);
        match declared_type {
            MessageType::Notification => {
                let message = Notification::from_json(body)?;
                ensure_declared(declared_type, &message.kind)?;
                self.check(&message.message_signature())?;
                Ok(Authenticated::Notification(message))
            }
            MessageType::SubscriptionConfirmation => {
                let message = SubscriptionConfirmation::from_json(body)?;
                ensure_declared(declared_type, &message.kind)?;
                self.check(&message.message_signature())?;
                let receipt = self.confirmer.confirm(&Verified::new(message))?;
                Ok(Authenticated::SubscriptionConfirmed { receipt })
            }
            MessageType::UnsubscribeConfirmation => {
                let message = SubscriptionConfirmation::from_json(body)?;
                ensure_declared(declared_type, &message.kind)?;
                self.check(&message.message_signature())?;
                Ok(Authenticated::UnsubscribeConfirmed(message))
            }
            MessageType::Unknown => Err(AuthError::UnknownMessageType(declared.to_string())),
        }
    }

    fn check(&self, signature: &MessageSignature) -> Result<(), AuthError> {
        let cert_url = self.origin.validate(&signature.signing_cert_url)?;
        self.verifier.verify(signature, &cert_url)?;
        Ok(())
    }
}

/// The payload's own `Type` must be the type the header routed it as. The
/// signature covers `Type`, so a signed message cannot be replayed under a
/// different header.
fn ensure_declared(declared: MessageType, payload_kind: &str) -> Result<(), AuthError> {
    if MessageType::classify(payload_kind) != declared {
        return Err(AuthError::MessageTypeMismatch {
            declared: declared.as_str().to_string(),
            actual: payload_kind.to_string(),
        });
    }
    Ok(())
}

/// Header value as text; absent or non-UTF-8 values read as empty.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
