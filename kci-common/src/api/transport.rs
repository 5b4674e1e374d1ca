//! Blocking HTTP transport seam.
//!
//! The fetch client and log retrieval only need "GET this URL and hand back
//! status plus body". [`UreqTransport`] does that over the network;
//! tests replay canned responses through `ScriptedTransport`.

use std::io::Read;

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure (DNS, connect, TLS, timeout, body read).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Issues blocking GET requests.
pub trait HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }
}

/// Network transport backed by a shared [`ureq::Agent`].
///
/// Non-2xx statuses are returned as responses, not errors, so the caller
/// decides what is retryable.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .user_agent(concat!("kci/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = Vec::new();
        response
            .into_body()
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| TransportError(format!("failed to read body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}

/// Replays a fixed sequence of responses and records requested URLs.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: std::sync::Mutex<std::collections::VecDeque<Result<HttpResponse, TransportError>>>,
    requests: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into_iter().collect()),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Script made only of successful responses.
    pub fn with_responses(responses: impl IntoIterator<Item = HttpResponse>) -> Self {
        Self::new(responses.into_iter().map(Ok))
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl HttpTransport for ScriptedTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.responses
            .lock()
            .map_err(|_| TransportError("scripted transport poisoned".to_string()))?
            .pop_front()
            .unwrap_or_else(|| Err(TransportError(format!("no scripted response for {url}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_transport_replays_in_order() {
        let transport = ScriptedTransport::new([
            Ok(HttpResponse::new(503, "")),
            Err(TransportError("connection refused".into())),
        ]);

        assert_eq!(transport.get("https://a").unwrap().status, 503);
        assert!(transport.get("https://b").is_err());
        // Exhausted script behaves like a transport failure.
        assert!(transport.get("https://c").is_err());
        assert_eq!(transport.requests(), vec!["https://a", "https://b", "https://c"]);
    }

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }
}
