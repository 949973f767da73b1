//! Inbound payload model
//!
//! Typed representations of the JSON bodies the provider pushes to the
//! endpoint, and the message-type enumeration used to route them.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::canonical::{self, NOTIFICATION_SIGN_KEYS, SUBSCRIPTION_SIGN_KEYS};
use crate::error::DecodeError;

/// Declared type of an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Unknown,
    Notification,
    SubscriptionConfirmation,
    UnsubscribeConfirmation,
}

impl MessageType {
    /// Classify a type string. Anything unrecognised, including the empty
    /// string, is [`MessageType::Unknown`].
    pub fn classify(value: &str) -> Self {
        match value {
            "Notification" => MessageType::Notification,
            "SubscriptionConfirmation" => MessageType::SubscriptionConfirmation,
            "UnsubscribeConfirmation" => MessageType::UnsubscribeConfirmation,
            _ => MessageType::Unknown,
        }
    }

    /// Wire name of the type; empty for `Unknown`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Unknown => "",
            MessageType::Notification => "Notification",
            MessageType::SubscriptionConfirmation => "SubscriptionConfirmation",
            MessageType::UnsubscribeConfirmation => "UnsubscribeConfirmation",
        }
    }

    /// Ordered field names included in the canonical signed bytes.
    pub fn sign_keys(&self) -> Vec<&'static str> {
        match self {
            MessageType::Notification => canonical::key_names(NOTIFICATION_SIGN_KEYS),
            MessageType::SubscriptionConfirmation | MessageType::UnsubscribeConfirmation => {
                canonical::key_names(SUBSCRIPTION_SIGN_KEYS)
            }
            MessageType::Unknown => Vec::new(),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Unknown => write!(f, "Unknown"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Signature material derived from a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSignature {
    /// Canonical bytes the provider signed.
    pub signed: Vec<u8>,
    pub signature_version: String,
    /// Base64 text of the claimed signature.
    pub signature: String,
    pub signing_cert_url: String,
}

/// A single entry of a notification's `MessageAttributes` map.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageAttribute {
    #[serde(rename = "Type")]
    pub data_type: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// A message delivered to a confirmed subscription.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "MessageId")]
    pub message_id: String,
    #[serde(rename = "TopicArn")]
    pub topic_arn: String,
    #[serde(rename = "Subject", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "SignatureVersion")]
    pub signature_version: String,
    #[serde(rename = "Signature")]
    pub signature: String,
    #[serde(rename = "SigningCertURL")]
    pub signing_cert_url: String,
    #[serde(rename = "UnsubscribeURL", skip_serializing_if = "Option::is_none")]
    pub unsubscribe_url: Option<String>,
    #[serde(rename = "ReceiptHandle", skip_serializing_if = "Option::is_none")]
    pub receipt_handle: Option<String>,
    #[serde(rename = "MessageAttributes", skip_serializing_if = "Option::is_none")]
    pub message_attributes: Option<HashMap<String, MessageAttribute>>,
}

impl Notification {
    /// Decode a notification from a JSON request body.
    pub fn from_json(body: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Type declared by the payload itself.
    pub fn message_type(&self) -> MessageType {
        MessageType::classify(&self.kind)
    }

    /// Canonical bytes plus the claimed signature metadata.
    pub fn message_signature(&self) -> MessageSignature {
        MessageSignature {
            signed: canonical::notification_bytes(self),
            signature_version: self.signature_version.clone(),
            signature: self.signature.clone(),
            signing_cert_url: self.signing_cert_url.clone(),
        }
    }

    /// Look up a message attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&MessageAttribute> {
        self.message_attributes.as_ref()?.get(name)
    }
}

/// Handshake request sent when a subscription is created. The same shape is
/// used for `UnsubscribeConfirmation` messages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionConfirmation {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "MessageId")]
    pub message_id: String,
    #[serde(rename = "Token")]
    pub token: String,
    #[serde(rename = "TopicArn")]
    pub topic_arn: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "SubscribeURL")]
    pub subscribe_url: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "SignatureVersion")]
    pub signature_version: String,
    #[serde(rename = "Signature")]
    pub signature: String,
    #[serde(rename = "SigningCertURL")]
    pub signing_cert_url: String,
}

impl SubscriptionConfirmation {
    /// Decode a subscription (or unsubscribe) confirmation from a JSON body.
    pub fn from_json(body: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn message_type(&self) -> MessageType {
        MessageType::classify(&self.kind)
    }

    pub fn message_signature(&self) -> MessageSignature {
        MessageSignature {
            signed: canonical::subscription_bytes(self),
            signature_version: self.signature_version.clone(),
            signature: self.signature.clone(),
            signing_cert_url: self.signing_cert_url.clone(),
        }
    }
}
