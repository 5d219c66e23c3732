use axum::http::{self, Request, StatusCode};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use http_body_util::BodyExt;
use mock_server::{app, Template};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn data_uri(payload: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(payload))
}

// --- health ---

#[tokio::test]
async fn health_returns_ok() {
    let app = app();
    let resp = app
        .oneshot(Request::builder().uri("/health").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

// --- extract ---

#[tokio::test]
async fn extract_returns_event_fields() {
    let app = app();
    let payload = json!({"image": data_uri(b"fake poster bytes")});
    let resp = app
        .oneshot(json_request("POST", "/extract", &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Sample Event");
    assert_eq!(body["data"]["size_bytes"], 17);
}

#[tokio::test]
async fn extract_rejects_missing_data_uri_envelope() {
    let app = app();
    let payload = json!({"image": "aGVsbG8="});
    let resp = app
        .oneshot(json_request("POST", "/extract", &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Image must be a base64 data URI");
}

#[tokio::test]
async fn extract_rejects_invalid_base64() {
    let app = app();
    let payload = json!({"image": "data:image/png;base64,!!!not-base64!!!"});
    let resp = app
        .oneshot(json_request("POST", "/extract", &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Invalid base64 image payload");
}

#[tokio::test]
async fn extract_garbage_payload_returns_500() {
    let app = app();
    let payload = json!({"image": data_uri(b"garbage")});
    let resp = app
        .oneshot(json_request("POST", "/extract", &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"error": "bad image"}));
}

#[tokio::test]
async fn extract_malformed_payload_returns_422() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/extract", r#"{"not_image":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- generate-email ---

#[tokio::test]
async fn generate_email_renders_template() {
    let app = app();
    let payload = json!({
        "template_type": "event_announcement",
        "event_data": {"title": "Spring Gala", "date": "2026-06-01", "location": "Main Hall"},
    });
    let resp = app
        .oneshot(json_request("POST", "/generate-email", &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["subject"], "You're invited: Spring Gala");
    assert_eq!(
        body["body"],
        "Join us for Spring Gala on 2026-06-01 at Main Hall."
    );
}

#[tokio::test]
async fn generate_email_unknown_template_returns_404() {
    let app = app();
    let payload = json!({"template_type": "nonexistent", "event_data": {}});
    let resp = app
        .oneshot(json_request("POST", "/generate-email", &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Unknown template type: nonexistent");
}

#[tokio::test]
async fn generate_email_missing_event_data_leaves_placeholders() {
    let app = app();
    let payload = json!({"template_type": "thank_you"});
    let resp = app
        .oneshot(json_request("POST", "/generate-email", &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["subject"], "Thanks for attending {title}");
}

// --- send-email ---

#[tokio::test]
async fn send_email_reports_sent() {
    let app = app();
    let payload = json!({"to": "a@b.com", "subject": "Subj", "body": "Body"});
    let resp = app
        .oneshot(json_request("POST", "/send-email", &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "sent");
    assert_eq!(body["to"], "a@b.com");
    assert!(body["message_id"].is_string());
}

#[tokio::test]
async fn send_email_rejects_invalid_recipient() {
    let app = app();
    let payload = json!({"to": "not-an-address", "subject": "S", "body": "B"});
    let resp = app
        .oneshot(json_request("POST", "/send-email", &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Invalid recipient address");
}

// --- templates ---

#[tokio::test]
async fn templates_lists_seeded_definitions() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/templates")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let templates: Vec<Template> = body_json(resp).await;
    assert_eq!(templates.len(), 3);
    assert!(templates.iter().any(|t| t.id == "event_announcement"));
    assert!(templates.iter().any(|t| t.id == "event_reminder"));
    assert!(templates.iter().any(|t| t.id == "thank_you"));
}
