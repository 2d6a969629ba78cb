//! HTTP transport types and the `Transport` seam.
//!
//! # Design
//! Requests and responses are plain data. `HnClient` builds `HttpRequest`
//! values and parses `HttpResponse` values without knowing how the round trip
//! happens; a `Transport` executes it. Status codes are returned as data and
//! interpreted by the client, so a transport only fails when no response was
//! obtained at all.
//!
//! The API is read-only, so every request is a GET.

use tracing::debug;

use crate::error::ApiError;

/// An HTTP GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// Executes an `HttpRequest` and hands back the full response.
///
/// Implementations must return non-2xx responses as `Ok` data and reserve
/// `Err(ApiError::TransportError)` for failures that produced no response.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, ApiError>,
{
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// Timeouts, proxies and TLS are whatever the agent was configured with.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl UreqTransport {
    /// Wrap a caller-configured agent. The agent should have
    /// `http_status_as_error(false)` so 404s reach the client as data.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.agent.get(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder
            .call()
            .map_err(|e| ApiError::TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::TransportError(e.to_string()))?;
        // Invalid UTF-8 is a property of the content, not of the connection.
        let body = String::from_utf8_lossy(&bytes).into_owned();

        debug!(url = %request.url, status, bytes = body.len(), "received response");

        Ok(HttpResponse { status, body })
    }
}
