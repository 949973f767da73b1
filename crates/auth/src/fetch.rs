//! Outbound fetch capability
//!
//! Certificate retrieval and subscription confirmation both go through the
//! [`Fetch`] trait so the transport can be swapped out (tests use an in-memory
//! fake). [`HttpFetcher`] is the production implementation.

use std::time::Duration;

use crate::error::TransportError;

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking GET capability.
///
/// Implementations must not retry; a failed request is reported once.
pub trait Fetch: Send + Sync {
    fn get(&self, url: &str) -> Result<FetchResponse, TransportError>;
}

/// [`Fetch`] over a blocking `reqwest` client.
///
/// Redirects are never followed: a `3xx` is returned as is, so the only host
/// contacted is the one named by the URL the caller passed in. The client
/// owns its own runtime thread; construct it outside of any async context and
/// call it from blocking threads only.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with an optional overall request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("snsguard/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::none());
        // reqwest's blocking client defaults to a 30s timeout; `None` keeps it.
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TransportError::Request {
            url: String::new(),
            reason: format!("failed to build HTTP client: {}", e),
        })?;
        Ok(Self { client })
    }

    /// Wrap an already configured client. The caller is responsible for its
    /// redirect policy.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| TransportError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(FetchResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_success_range() {
        assert!(FetchResponse::new(200, "ok").is_success());
        assert!(FetchResponse::new(204, Vec::new()).is_success());
        assert!(!FetchResponse::new(301, "moved").is_success());
        assert!(!FetchResponse::new(404, "not found").is_success());
        assert!(!FetchResponse::new(500, "").is_success());
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new(Some(Duration::from_secs(5))).is_ok());
        assert!(HttpFetcher::new(None).is_ok());
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        let fetcher = HttpFetcher::new(Some(Duration::from_secs(2))).unwrap();
        let result = fetcher.get("http://127.0.0.1:1/cert.pem");
        assert!(matches!(result, Err(TransportError::Request { .. })));
    }

    #[test]
    fn test_redirects_are_not_followed() {
        // Stands in for a host that never passed origin validation.
        let target = TcpListener::bind("127.0.0.1:0").unwrap();
        target.set_nonblocking(true).unwrap();
        let target_addr = target.local_addr().unwrap();

        let origin = TcpListener::bind("127.0.0.1:0").unwrap();
        let origin_addr = origin.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (mut stream, _) = origin.accept().unwrap();
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let response = format!(
                "HTTP/1.1 302 Found\r\nLocation: http://{}/internal-secret\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                target_addr
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        let fetcher = HttpFetcher::new(Some(Duration::from_secs(5))).unwrap();
        let response = fetcher
            .get(&format!("http://{}/cert.pem", origin_addr))
            .unwrap();
        server.join().unwrap();

        assert_eq!(response.status, 302);
        assert!(response.body.is_empty());
        assert!(!response.is_success());
        assert_eq!(
            target.accept().map(|_| ()).unwrap_err().kind(),
            std::io::ErrorKind::WouldBlock
        );
    }
}
