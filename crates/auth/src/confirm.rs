//! Subscription handshake

use std::ops::Deref;
use std::sync::Arc;

use crate::error::ConfirmError;
use crate::fetch::Fetch;
use crate::message::SubscriptionConfirmation;

/// A payload whose signature has been verified.
///
/// Only the authenticator constructs this, so holding one proves the origin
/// and signature checks ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T>(T);

impl<T> Verified<T> {
    pub(crate) fn new(inner: T) -> Self {
        Self(inner)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Verified<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Completes a pending subscription by visiting its `SubscribeURL`.
#[derive(Clone)]
pub struct SubscriptionConfirmer {
    fetcher: Arc<dyn Fetch>,
}

impl SubscriptionConfirmer {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self { fetcher }
    }

    /// GET the confirmation URL and return the provider's receipt.
    ///
    /// The receipt is decoded as UTF-8; invalid byte sequences are replaced
    /// with U+FFFD rather than rejected.
    pub fn confirm(
        &self,
        message: &Verified<SubscriptionConfirmation>,
    ) -> Result<String, ConfirmError> {
        let response = self.fetcher.get(&message.subscribe_url)?;
        if !response.is_success() {
            return Err(ConfirmError::Rejected {
                status: response.status,
            });
        }
        Ok(String::from_utf8_lossy(&response.body).into_owned())
    }
}
