//! The blocking API client.
//!
//! # Design
//! Five operations against the event-poster backend, all following the same
//! shape: build a request, execute it with the operation's timeout, fold the
//! response (or failure) into the uniform result mapping. Building and
//! interpretation are pure `build_*` / `parse_*` methods over plain-data
//! `HttpRequest`/`HttpResponse` values, so the contract is testable without
//! a network; the blocking operations add the transport round trip and the
//! guarantee that no failure escapes as `Err` or panic.

use std::time::Duration;

use serde_json::{Map, Value};
use tracing::error;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, UreqTransport};
use crate::types::{ApiOutcome, ExtractRequest, GenerateEmailRequest, SendEmailRequest};

/// Message returned when `extract_data` exceeds its timeout.
pub const EXTRACT_TIMEOUT_ERROR: &str = "Request timeout - backend is taking too long";

/// Fixed message for a failed template listing.
pub const TEMPLATES_FETCH_ERROR: &str = "Failed to fetch templates";

const UNKNOWN_ERROR: &str = "Unknown error";

/// Blocking client for the event-poster backend.
///
/// Holds the base address and a reusable HTTP session; each operation is an
/// independent round trip. Operations never return `Err` — every failure is
/// converted into the uniform mapping (`test_connection` reports plain
/// `false`).
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    transport: UreqTransport,
    config: ClientConfig,
}

impl ApiClient {
    /// Client for the backend at `base_url` with default timeouts.
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport: UreqTransport::new(),
            config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- request builders -------------------------------------------------

    pub fn build_health(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/health", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_extract(&self, image_base64: &str) -> Result<HttpRequest, ApiError> {
        self.build_post("/extract", &ExtractRequest::new(image_base64))
    }

    pub fn build_generate_email(
        &self,
        template_type: &str,
        event_data: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_post(
            "/generate-email",
            &GenerateEmailRequest {
                template_type: template_type.to_string(),
                event_data,
            },
        )
    }

    pub fn build_send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.build_post(
            "/send-email",
            &SendEmailRequest {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            },
        )
    }

    pub fn build_templates(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/templates", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn build_post<T: serde::Serialize>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{endpoint}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    // --- response interpreters --------------------------------------------

    /// 200 means reachable; anything else does not.
    pub fn parse_health(&self, response: &HttpResponse) -> bool {
        response.status == 200
    }

    pub fn parse_extract(&self, response: HttpResponse) -> ApiOutcome {
        passthrough_outcome(response)
    }

    pub fn parse_generate_email(&self, response: HttpResponse) -> ApiOutcome {
        passthrough_outcome(response)
    }

    pub fn parse_send_email(&self, response: HttpResponse) -> ApiOutcome {
        passthrough_outcome(response)
    }

    /// 200 wraps the raw body under `templates`; any other status maps to
    /// the fixed message without inspecting the body.
    pub fn parse_templates(&self, response: HttpResponse) -> ApiOutcome {
        if response.status != 200 {
            return ApiOutcome::failure(TEMPLATES_FETCH_ERROR);
        }
        match serde_json::from_str::<Value>(&response.body) {
            Ok(templates) => {
                let mut fields = Map::new();
                fields.insert("success".to_string(), Value::Bool(true));
                fields.insert("templates".to_string(), templates);
                ApiOutcome::from_fields(fields)
            }
            Err(e) => ApiOutcome::failure(format!("malformed backend response: {e}")),
        }
    }

    // --- blocking operations ----------------------------------------------

    /// True iff the backend answers the health endpoint with 200 in time.
    pub fn test_connection(&self) -> bool {
        let request = self.build_health();
        match self
            .transport
            .execute(&request, Duration::from_secs(self.config.health_timeout_secs))
        {
            Ok(response) => self.parse_health(&response),
            Err(_) => false,
        }
    }

    /// Extract structured event data from a base64-encoded poster image.
    ///
    /// The one operation with a dedicated timeout message; extraction runs
    /// long enough that "slow backend" is a state worth naming to the user.
    pub fn extract_data(&self, image_base64: &str) -> ApiOutcome {
        let request = match self.build_extract(image_base64) {
            Ok(request) => request,
            Err(err) => return self.operation_failed("extract_data", err),
        };
        match self
            .transport
            .execute(&request, Duration::from_secs(self.config.extract_timeout_secs))
        {
            Ok(response) => self.parse_extract(response),
            Err(ApiError::Timeout) => {
                error!("extract_data timed out");
                ApiOutcome::failure(EXTRACT_TIMEOUT_ERROR)
            }
            Err(err) => self.operation_failed("extract_data", err),
        }
    }

    /// Generate an email from a template and per-event field values.
    pub fn generate_email(
        &self,
        template_type: &str,
        event_data: Map<String, Value>,
    ) -> ApiOutcome {
        let request = match self.build_generate_email(template_type, event_data) {
            Ok(request) => request,
            Err(err) => return self.operation_failed("generate_email", err),
        };
        match self
            .transport
            .execute(&request, Duration::from_secs(self.config.generate_timeout_secs))
        {
            Ok(response) => self.parse_generate_email(response),
            Err(err) => self.operation_failed("generate_email", err),
        }
    }

    /// Send an email through the backend.
    pub fn send_email(&self, to: &str, subject: &str, body: &str) -> ApiOutcome {
        let request = match self.build_send_email(to, subject, body) {
            Ok(request) => request,
            Err(err) => return self.operation_failed("send_email", err),
        };
        match self
            .transport
            .execute(&request, Duration::from_secs(self.config.send_timeout_secs))
        {
            Ok(response) => self.parse_send_email(response),
            Err(err) => self.operation_failed("send_email", err),
        }
    }

    /// List the available email templates.
    pub fn get_templates(&self) -> ApiOutcome {
        let request = self.build_templates();
        match self
            .transport
            .execute(&request, Duration::from_secs(self.config.templates_timeout_secs))
        {
            Ok(response) => self.parse_templates(response),
            Err(err) => self.operation_failed("get_templates", err),
        }
    }

    fn operation_failed(&self, operation: &str, err: ApiError) -> ApiOutcome {
        error!("{operation} failed: {err}");
        ApiOutcome::failure(err.to_string())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::with_config(ClientConfig::default())
    }
}

/// Fold a response into the uniform mapping: 200 passes the body object
/// through verbatim (`success` defaults to `true` when the backend omits
/// it), non-200 surfaces the backend's string `error` field when one is
/// present.
fn passthrough_outcome(response: HttpResponse) -> ApiOutcome {
    if response.status == 200 {
        return match serde_json::from_str::<Map<String, Value>>(&response.body) {
            Ok(mut fields) => {
                fields
                    .entry("success".to_string())
                    .or_insert(Value::Bool(true));
                ApiOutcome::from_fields(fields)
            }
            Err(e) => ApiOutcome::failure(format!("malformed backend response: {e}")),
        };
    }
    let message = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
    ApiOutcome::failure(message)
}
