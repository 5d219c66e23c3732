//! Request payloads and the uniform result mapping.
//!
//! # Design
//! Payload DTOs are defined independently of the mock-server crate;
//! integration tests catch schema drift. The backend owns the schema of its
//! success responses and this client treats them as opaque, so `ApiOutcome`
//! wraps a raw JSON object instead of typed fields: 200 bodies pass through
//! verbatim, failures are normalized to `{"success": false, "error": ...}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope prefix applied to outgoing image payloads.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Request payload for `POST /extract`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub image: String,
}

impl ExtractRequest {
    /// Wrap raw base64 image data in the data-URI envelope the backend expects.
    pub fn new(image_base64: &str) -> Self {
        Self {
            image: format!("{DATA_URI_PREFIX}{image_base64}"),
        }
    }
}

/// Request payload for `POST /generate-email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateEmailRequest {
    pub template_type: String,
    pub event_data: Map<String, Value>,
}

/// Request payload for `POST /send-email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// The uniform result mapping returned by every operation.
///
/// Always a JSON object. On success the backend's response fields pass
/// through verbatim; on failure `success` is `false` and `error` holds a
/// readable description of the cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiOutcome(Map<String, Value>);

impl ApiOutcome {
    /// The failure shape: `{"success": false, "error": message}`.
    pub fn failure(message: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("success".to_string(), Value::Bool(false));
        fields.insert("error".to_string(), Value::String(message.into()));
        Self(fields)
    }

    pub(crate) fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Whether the operation succeeded. An absent or non-boolean `success`
    /// field counts as failure.
    pub fn success(&self) -> bool {
        self.0
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// The failure description, when one is present.
    pub fn error(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    /// A field passed through from the backend response.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
