//! Blocking HTTP executor for `HttpRequest` values.
//!
//! # Design
//! The client crate describes requests as plain data; this module is the
//! host side that actually performs the round-trip. `Transport` is the seam
//! the controller is generic over, so tests can script responses without a
//! socket. `UreqTransport` is the real implementation: one agent, a fixed
//! global timeout, and non-2xx statuses returned as data rather than errors
//! so the client's `parse_*` methods interpret them.

use std::fmt;
use std::time::Duration;

use todo_client::{HttpMethod, HttpRequest, HttpResponse};

/// Per-request timeout applied to every call. There is no retry; a timeout
/// surfaces as a single failed operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A failed round-trip: timeout, refused connection, or any other I/O
/// problem. Callers surface it as a notification without distinguishing the
/// cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "network error: {}", self.message)
    }
}

impl std::error::Error for TransportError {}

/// Executes an `HttpRequest` and returns the raw `HttpResponse`.
///
/// Implementations must report HTTP error statuses as `Ok` responses; only
/// failures to complete the round-trip are `Err`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Real transport backed by a ureq agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match (&request.method, &request.body) {
            (HttpMethod::Get, _) => self.agent.get(&request.path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&request.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&request.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&request.path).send_empty(),
            (HttpMethod::Patch, Some(body)) => self
                .agent
                .patch(&request.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Patch, None) => self.agent.patch(&request.path).send_empty(),
        };

        let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_server_is_a_transport_error() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = UreqTransport::with_timeout(Duration::from_secs(1));
        let request = HttpRequest {
            method: HttpMethod::Get,
            path: format!("http://{addr}/api/health"),
            headers: Vec::new(),
            body: None,
        };
        let err = transport.execute(&request).unwrap_err();
        assert!(err.to_string().starts_with("network error:"));
    }
}
