//! Request-scoped handoff of the authenticated notification
//!
//! The notification is stored in the request's type-keyed extensions; the
//! [`Notification`] type itself is the lookup key.

use http::Extensions;

use crate::error::ContextError;
use crate::message::Notification;

/// Store an authenticated notification for downstream handlers.
pub fn set_notification(extensions: &mut Extensions, notification: Notification) {
    extensions.insert(notification);
}

/// Fetch the notification stored by [`set_notification`].
pub fn get_notification(extensions: &Extensions) -> Result<&Notification, ContextError> {
    extensions
        .get::<Notification>()
        .ok_or(ContextError::NotificationNotFound)
}
