//! In-memory stand-in for the event-poster backend.
//!
//! Serves the five endpoints the client talks to: `/health`, `/extract`,
//! `/generate-email`, `/send-email`, `/templates`. Extraction and sending
//! are stubbed; template lookup and placeholder rendering are real. Control
//! payloads on `/extract` (decoded `sleep:<ms>` or `garbage`) let client
//! tests drive the slow-backend and backend-error paths.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

/// An email template definition served by `/templates`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub subject: String,
    pub body: String,
}

#[derive(Deserialize)]
pub struct ExtractPayload {
    pub image: String,
}

#[derive(Deserialize)]
pub struct GenerateEmailPayload {
    pub template_type: String,
    #[serde(default)]
    pub event_data: Map<String, Value>,
}

#[derive(Deserialize)]
pub struct SendEmailPayload {
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub type TemplateStore = Arc<Vec<Template>>;

pub fn seed_templates() -> Vec<Template> {
    vec![
        Template {
            id: "event_announcement".to_string(),
            name: "Event announcement".to_string(),
            description: "First announcement of an upcoming event".to_string(),
            subject: "You're invited: {title}".to_string(),
            body: "Join us for {title} on {date} at {location}.".to_string(),
        },
        Template {
            id: "event_reminder".to_string(),
            name: "Event reminder".to_string(),
            description: "Reminder sent shortly before the event".to_string(),
            subject: "Reminder: {title} is coming up".to_string(),
            body: "{title} starts at {time} on {date}. See you at {location}!".to_string(),
        },
        Template {
            id: "thank_you".to_string(),
            name: "Thank you".to_string(),
            description: "Follow-up for attendees after the event".to_string(),
            subject: "Thanks for attending {title}".to_string(),
            body: "Thank you for joining us at {title}. We hope to see you again.".to_string(),
        },
    ]
}

pub fn app() -> Router {
    let templates: TemplateStore = Arc::new(seed_templates());
    Router::new()
        .route("/health", get(health))
        .route("/extract", post(extract))
        .route("/generate-email", post(generate_email))
        .route("/send-email", post(send_email))
        .route("/templates", get(list_templates))
        .with_state(templates)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Replace `{field}` placeholders in `text` with values from the event data.
/// Unknown placeholders are left untouched.
pub fn render(text: &str, data: &Map<String, Value>) -> String {
    let mut out = text.to_string();
    for (key, value) in data {
        let placeholder = format!("{{{key}}}");
        let replacement = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out = out.replace(&placeholder, &replacement);
    }
    out
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn extract(Json(payload): Json<ExtractPayload>) -> (StatusCode, Json<Value>) {
    let Some(encoded) = payload
        .image
        .strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(',').map(|(_, b64)| b64))
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Image must be a base64 data URI"})),
        );
    };
    let Ok(bytes) = BASE64.decode(encoded) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Invalid base64 image payload"})),
        );
    };

    // Control payloads for driving client test scenarios.
    let control = std::str::from_utf8(&bytes).unwrap_or("");
    if let Some(ms) = control
        .strip_prefix("sleep:")
        .and_then(|v| v.parse::<u64>().ok())
    {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    } else if control == "garbage" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "bad image"})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "title": "Sample Event",
                "date": "2026-06-01",
                "time": "18:00",
                "location": "Main Hall",
                "description": "Extracted from a poster image",
                "size_bytes": bytes.len(),
            }
        })),
    )
}

async fn generate_email(
    State(templates): State<TemplateStore>,
    Json(payload): Json<GenerateEmailPayload>,
) -> (StatusCode, Json<Value>) {
    let Some(template) = templates.iter().find(|t| t.id == payload.template_type) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": format!("Unknown template type: {}", payload.template_type),
            })),
        );
    };
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "template_type": template.id,
            "subject": render(&template.subject, &payload.event_data),
            "body": render(&template.body, &payload.event_data),
        })),
    )
}

async fn send_email(Json(payload): Json<SendEmailPayload>) -> (StatusCode, Json<Value>) {
    if !payload.to.contains('@') {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Invalid recipient address"})),
        );
    }
    tracing::info!(
        to = %payload.to,
        subject = %payload.subject,
        bytes = payload.body.len(),
        "mock send"
    );
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "status": "sent",
            "message_id": Uuid::new_v4(),
            "to": payload.to,
        })),
    )
}

async fn list_templates(State(templates): State<TemplateStore>) -> Json<Vec<Template>> {
    Json(templates.as_ref().clone())
}
