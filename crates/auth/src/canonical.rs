//! Canonical signed-bytes construction
//!
//! The provider signs a newline-delimited `key\nvalue\n` sequence built from a
//! fixed, per-type list of fields. Each list below pairs a wire field name with
//! an accessor so the canonical form is visible in one place and cannot drift
//! when the payload structs change shape.

use crate::message::{MessageType, Notification, SubscriptionConfirmation};

/// Wire field name and the accessor that reads it from a payload.
pub(crate) type SignKey<T> = (&'static str, fn(&T) -> Option<&str>);

pub(crate) const NOTIFICATION_SIGN_KEYS: &[SignKey<Notification>] = &[
    ("Message", |m| Some(m.message.as_str())),
    ("MessageId", |m| Some(m.message_id.as_str())),
    ("Subject", |m| m.subject.as_deref()),
    ("Timestamp", |m| Some(m.timestamp.as_str())),
    ("TopicArn", |m| Some(m.topic_arn.as_str())),
    ("Type", |m| Some(m.kind.as_str())),
];

pub(crate) const SUBSCRIPTION_SIGN_KEYS: &[SignKey<SubscriptionConfirmation>] = &[
    ("Message", |m| Some(m.message.as_str())),
    ("MessageId", |m| Some(m.message_id.as_str())),
    ("SubscribeURL", |m| Some(m.subscribe_url.as_str())),
    ("Timestamp", |m| Some(m.timestamp.as_str())),
    ("Token", |m| Some(m.token.as_str())),
    ("TopicArn", |m| Some(m.topic_arn.as_str())),
    ("Type", |m| Some(m.kind.as_str())),
];

pub(crate) fn key_names<T>(keys: &[SignKey<T>]) -> Vec<&'static str> {
    keys.iter().map(|(name, _)| *name).collect()
}

/// Append `name\nvalue\n` for every populated field, skipping absent or empty
/// ones entirely.
fn encode<T>(payload: &T, keys: &[SignKey<T>]) -> Vec<u8> {
    let mut buf = Vec::new();
    for (name, read) in keys {
        let value = match read(payload) {
            Some(value) if !value.is_empty() => value,
            _ => continue,
        };
        buf.extend_from_slice(name.as_bytes());
        buf.push(b'\n');
        buf.extend_from_slice(value.as_bytes());
        buf.push(b'\n');
    }
    buf
}

/// Canonical bytes of a notification. Empty unless the payload's own `Type`
/// is `Notification`.
pub fn notification_bytes(message: &Notification) -> Vec<u8> {
    match message.message_type() {
        MessageType::Notification => encode(message, NOTIFICATION_SIGN_KEYS),
        _ => Vec::new(),
    }
}

/// Canonical bytes of a subscription or unsubscribe confirmation. Empty unless
/// the payload's own `Type` is one of those two.
pub fn subscription_bytes(message: &SubscriptionConfirmation) -> Vec<u8> {
    match message.message_type() {
        MessageType::SubscriptionConfirmation | MessageType::UnsubscribeConfirmation => {
            encode(message, SUBSCRIPTION_SIGN_KEYS)
        }
        _ => Vec::new(),
    }
}
