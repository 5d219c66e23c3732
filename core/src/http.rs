//! Plain-data HTTP types and the ureq-backed transport.
//!
//! # Design
//! Requests and responses are described as plain values so request building
//! and response interpretation stay deterministic and unit-testable without
//! a network. `UreqTransport` is the one place real I/O happens: it owns a
//! reusable `ureq::Agent` (connection pool lifetime = client lifetime) and
//! applies the per-operation timeout to each round trip.

use std::time::Duration;

use ureq::Agent;

use crate::error::ApiError;

/// HTTP verb for a request. Only the verbs this API uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `ApiClient::build_*` methods and executed by `UreqTransport`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Produced by `UreqTransport::execute`, consumed by `ApiClient::parse_*`.
/// No operation reads response headers, so only status and body are kept.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Blocking executor for `HttpRequest` values.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses come back as data for the client to interpret; only
/// transport-level failures (connect, TLS, timeout, body read) surface as
/// `ApiError`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Execute one round trip, bounded overall by `timeout`.
    pub fn execute(
        &self,
        request: &HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = ?request.method, path = %request.path, "dispatching request");

        let result = match (&request.method, &request.body) {
            (HttpMethod::Get, _) => {
                let mut builder = self.agent.get(&request.path);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder
                    .config()
                    .timeout_global(Some(timeout))
                    .build()
                    .call()
            }
            (HttpMethod::Post, Some(body)) => {
                let mut builder = self.agent.post(&request.path);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder
                    .config()
                    .timeout_global(Some(timeout))
                    .build()
                    .send(body.as_bytes())
            }
            (HttpMethod::Post, None) => self
                .agent
                .post(&request.path)
                .config()
                .timeout_global(Some(timeout))
                .build()
                .send_empty(),
        };

        let mut response = result?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;
        Ok(HttpResponse { status, body })
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}
