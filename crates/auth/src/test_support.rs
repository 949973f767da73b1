//! In-memory [`Fetch`] shared by the unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::TransportError;
use crate::fetch::{Fetch, FetchResponse};

/// Serves canned responses by URL, falling back to a default response when
/// one is set, and records every URL requested. With neither, a request fails
/// as a transport error.
#[derive(Default)]
pub(crate) struct RecordingFetcher {
    responses: HashMap<String, FetchResponse>,
    fallback: Option<FetchResponse>,
    calls: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    /// Fetcher on which every request fails.
    pub(crate) fn offline() -> Self {
        Self::default()
    }

    /// Fetcher answering every URL with the same response.
    pub(crate) fn always(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            fallback: Some(FetchResponse::new(status, body)),
            ..Self::default()
        }
    }

    pub(crate) fn with_response(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), FetchResponse::new(status, body));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetch for RecordingFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| TransportError::Request {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
    }
}
