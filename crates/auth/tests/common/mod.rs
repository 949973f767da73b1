//! Shared fixtures for the integration tests
//!
//! Payloads below carry real signatures made by the certificates under
//! `tests/fixtures/`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use http::{HeaderMap, HeaderValue};
use serde_json::{json, Value};
use snsguard_auth::{
    Authenticator, Fetch, FetchResponse, TransportError, VerifierConfig, MESSAGE_TYPE_HEADER,
    TOPIC_ARN_HEADER,
};

pub const NOTIFICATION_CERT: &str = include_str!("../fixtures/sns_test_cert.pem");
pub const CONFIRMATION_CERT: &str = include_str!("../fixtures/sns_confirmation_cert.pem");

pub const NOTIFICATION_TOPIC: &str = "arn:aws:sns:ap-northeast-1:000000000000:topic-01";
pub const NOTIFICATION_CERT_URL: &str =
    "https://sns.us-east-1.amazonaws.com/SimpleNotificationService-0000000000000000000000.pem";

pub const CONFIRMATION_TOPIC: &str = "arn:aws:sns:us-west-2:123456789012:MyTopic";
pub const CONFIRMATION_CERT_URL: &str =
    "https://sns.us-west-2.amazonaws.com/SimpleNotificationService-7ff2be2b3b1b.pem";
pub const SUBSCRIBE_URL: &str = "https://sns.us-west-2.amazonaws.com/?Action=ConfirmSubscription&TopicArn=arn:aws:sns:us-west-2:123456789012:MyTopic&Token=Ethevee8dae4mie3";
pub const CONFIRM_RECEIPT: &str = "<ConfirmSubscriptionResponse><ConfirmSubscriptionResult><SubscriptionArn>arn:aws:sns:us-west-2:123456789012:MyTopic:2bcfbf39-05c3-41de-beaa-fcfcc21c8f55</SubscriptionArn></ConfirmSubscriptionResult></ConfirmSubscriptionResponse>";

/// Signed notification without a subject.
pub fn notification() -> Value {
    json!({
        "Type": "Notification",
        "MessageId": "2e41209f-2772-4a8d-8014-ed1fc296499d",
        "TopicArn": NOTIFICATION_TOPIC,
        "Message": "test",
        "Timestamp": "2021-12-17T02:28:11.491Z",
        "SignatureVersion": "1",
        "Signature": "HpJZNo/GIQHutIh3X8KWie9y5cE97WS6/dI4zzaZJd/mneFhCgg9m7QlSDFgvtCF253TefIsnydNxfGH3gQ5HcPsWHfeNDukhDVe86i4tjz/sBl4hbS7BLj9MMP5+6x/XaNaB/xbgQp2AdP6BJRxsGZlbnvZwNJUoOjMPjdZaIAvSle04LRarWmc6xFZBv4JSJ7w9nK8a6I2bg56oR35dpOv4GyDQbSuIohxikoNs9OFqTlUi3TxK0pDZE8CyTQG5KW10SIHrG7FWWBc3KVYujfUi7UbFbYLhMQVMG6yfcUrZmbyQyz3uZF3KEiRDkj8yOPVdLasvPXW/th3mGuudg==",
        "SigningCertURL": NOTIFICATION_CERT_URL,
        "UnsubscribeURL": "https://sns.us-east-1.amazonaws.com/?Action=Unsubscribe&SubscriptionArn=arn:aws:sns:ap-northeast-1:000000000000:topic-01:0b4ad5d1-d3f5-4b0a-9e58-9d9d6b0c3c3b",
        "MessageAttributes": {
            "priority": { "Type": "String", "Value": "high" }
        }
    })
}

/// Signed subscription confirmation.
pub fn subscription_confirmation() -> Value {
    json!({
        "Type": "SubscriptionConfirmation",
        "MessageId": "165545c9-2a5c-472c-8df2-7ff2be2b3b1b",
        "Token": "Ethevee8dae4mie3",
        "TopicArn": CONFIRMATION_TOPIC,
        "Message": "You have chosen to subscribe to the topic arn:aws:sns:us-west-2:123456789012:MyTopic.\nTo confirm the subscription, visit the SubscribeURL included in this message.",
        "SubscribeURL": SUBSCRIBE_URL,
        "Timestamp": "2012-04-26T20:45:04.751Z",
        "SignatureVersion": "1",
        "Signature": "g9a+TYQaq6SBoajJs3Vl2NAqeNhreN5SpdMcV+CXkkFr5K/OpIFfVQWuRRZJ065sPsF5HVHt9qfuEMSYE+lP2uoKQPGHp/zf49b/XF7IkJL/MhCH6xToxj/ccUlatmFOnck4f3HuuO9bm1ZRfULPCK+lcVs1+e9JtyJ+Jp88PA61bdA9igJ8KYz/XjV8+5AYYuXKNAafyzpsjjKs0uA5X89JTzX5RAWZCpQFv8zoymzk8jxNnKksUbIKinSo1Y3XF6pE8kPRnGja4ICbdv6N1GN4mVZUwJ7MHkpxZerMZbfbMNrMMIfOcGFRXdO6ZiEXkwtQF4dpxPB4cGJ5yTm0Ig==",
        "SigningCertURL": CONFIRMATION_CERT_URL
    })
}

/// Signed unsubscribe confirmation.
pub fn unsubscribe_confirmation() -> Value {
    json!({
        "Type": "UnsubscribeConfirmation",
        "MessageId": "47138184-6831-46b8-8f7c-afc488602d7d",
        "Token": "2336412f37fb6",
        "TopicArn": CONFIRMATION_TOPIC,
        "Message": "You have chosen to deactivate subscription arn:aws:sns:us-west-2:123456789012:MyTopic:2bcfbf39-05c3-41de-beaa-fcfcc21c8f55.\nTo cancel this operation and restore the subscription, visit the SubscribeURL included in this message.",
        "SubscribeURL": "https://sns.us-west-2.amazonaws.com/?Action=ConfirmSubscription&TopicArn=arn:aws:sns:us-west-2:123456789012:MyTopic&Token=2336412f37fb6",
        "Timestamp": "2012-04-26T20:06:41.581Z",
        "SignatureVersion": "1",
        "Signature": "Zsa+XNM+HOtQYRNz8tqHK9XxSqUWlj7FAlxUUbDvXrdh+wt1dRLXakLXR7cclIV6xd2ZcWvzYVczQs3bBWbKREcdpVR6G0yRp5XWdieY98fv1xmbXPryfF7CHnAAOIIQY6Q9ErK1BzcUah9F04DIhRWkRpyOyBa9AS6JtMT4aouqiGQNARTsX/JPKWWyA/3Z6a1Y+XpkSnzr0aharca2jrGuWsJ/7SqPPZoyLNQHvfbgS2CjSq1e+sLjKS8OE7IlN4mTpDaILFwOxjLL7wALwimTQgBsmbk1caaeG85eJTQimELB5E8hdjmao4sFGDeFKdkm1Jw2IVUCSoSspcsvaA==",
        "SigningCertURL": CONFIRMATION_CERT_URL
    })
}

pub fn body(payload: &Value) -> Vec<u8> {
    serde_json::to_vec(payload).unwrap()
}

pub fn headers(topic: &str, message_type: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(TOPIC_ARN_HEADER, HeaderValue::from_str(topic).unwrap());
    headers.insert(MESSAGE_TYPE_HEADER, HeaderValue::from_str(message_type).unwrap());
    headers
}

/// In-memory [`Fetch`] that serves canned responses by URL and records every
/// request. Unknown URLs fail as transport errors.
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, FetchResponse>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetcher serving both certificates and a successful confirmation.
    pub fn provider() -> Self {
        Self::new()
            .with_response(NOTIFICATION_CERT_URL, 200, NOTIFICATION_CERT)
            .with_response(CONFIRMATION_CERT_URL, 200, CONFIRMATION_CERT)
            .with_response(SUBSCRIBE_URL, 200, CONFIRM_RECEIPT)
    }

    pub fn with_response(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), FetchResponse::new(status, body));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetch for FakeFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Request {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
    }
}

pub fn authenticator(topic: &str, fetcher: Arc<FakeFetcher>) -> Authenticator {
    Authenticator::new(topic, &VerifierConfig::default(), fetcher).unwrap()
}
