//! axum boundary adapter
//!
//! [`sns_auth_middleware`] buffers the request body, runs the
//! [`Authenticator`] on a blocking thread and maps the outcome to a response.
//! Authenticated notifications continue to the wrapped handler with the
//! payload attached to the request; handlers read it back through the
//! [`SnsNotification`] extractor.

use std::sync::Arc;

use axum::{
    async_trait,
    body::{to_bytes, Body},
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;

use crate::authenticator::{Authenticated, Authenticator, MESSAGE_TYPE_HEADER};
use crate::context::{get_notification, set_notification};
use crate::error::{AuthError, RejectionClass};
use crate::message::Notification;

/// Default cap on buffered request bodies.
pub const DEFAULT_MAX_BODY_BYTES: usize = 512 * 1024;

/// Shared state for [`sns_auth_middleware`].
#[derive(Clone)]
pub struct SnsLayerState {
    pub authenticator: Arc<Authenticator>,
    pub max_body_bytes: usize,
}

impl SnsLayerState {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self {
            authenticator,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

/// Authenticate an inbound push before it reaches the wrapped handler.
///
/// Install with `axum::middleware::from_fn_with_state`.
pub async fn sns_auth_middleware(
    State(state): State<SnsLayerState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let bytes = match to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) if is_length_limit(&e) => {
            tracing::warn!(limit = state.max_body_bytes, "Rejected notification body: {}", e);
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
        Err(e) => {
            tracing::warn!("Failed to read notification body: {}", e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    tracing::debug!(
        message_type = parts
            .headers
            .get(MESSAGE_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(""),
        body_len = bytes.len(),
        "Authenticating push"
    );

    let authenticator = state.authenticator.clone();
    let headers = parts.headers.clone();
    let body = bytes.clone();
    let outcome =
        tokio::task::spawn_blocking(move || authenticator.authenticate(&headers, &body)).await;

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Authentication task failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match outcome {
        Ok(Authenticated::Notification(notification)) => {
            tracing::info!(
                message_id = %notification.message_id,
                topic_arn = %notification.topic_arn,
                "Notification authenticated"
            );
            set_notification(&mut parts.extensions, notification);
            next.run(Request::from_parts(parts, Body::from(bytes))).await
        }
        Ok(Authenticated::SubscriptionConfirmed { receipt }) => {
            tracing::info!("Subscription confirmed");
            (StatusCode::OK, receipt).into_response()
        }
        Ok(Authenticated::UnsubscribeConfirmed(message)) => {
            tracing::info!(
                message_id = %message.message_id,
                topic_arn = %message.topic_arn,
                "Unsubscribe confirmation acknowledged"
            );
            StatusCode::OK.into_response()
        }
        Err(err) => rejection(err),
    }
}

/// True when buffering stopped because the body exceeded the limit, rather
/// than because the stream itself failed.
fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

fn rejection(err: AuthError) -> Response {
    let status = match err.status_class() {
        RejectionClass::ClientError => StatusCode::BAD_REQUEST,
        RejectionClass::Forbidden => StatusCode::FORBIDDEN,
    };

    if err.is_transport_failure() {
        tracing::error!(kind = err.kind(), "Notification authentication failed: {}", err);
    } else {
        tracing::warn!(kind = err.kind(), "Notification rejected: {}", err);
    }

    (status, err.to_string()).into_response()
}

/// Extractor for the notification authenticated by [`sns_auth_middleware`].
///
/// Rejects with 500 when the handler is reachable without the middleware.
#[derive(Debug, Clone)]
pub struct SnsNotification(pub Notification);

#[async_trait]
impl<S> FromRequestParts<S> for SnsNotification
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        get_notification(&parts.extensions)
            .map(|notification| SnsNotification(notification.clone()))
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}
