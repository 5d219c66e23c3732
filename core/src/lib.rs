//! Blocking client for the event-poster backend.
//!
//! # Overview
//! Wraps the backend's five REST operations — health check, poster image
//! extraction, email template generation, email sending, template listing —
//! behind a uniform contract: every operation returns a mapping that always
//! carries `success`, and no failure (connect error, timeout, non-2xx
//! status, malformed body) ever reaches the caller as an `Err` or a panic.
//!
//! # Design
//! - `ApiClient` holds the base address and a reusable HTTP session; each
//!   operation is one independent blocking round trip with its own timeout.
//! - Request building and response interpretation are pure (`build_*` /
//!   `parse_*`) over plain-data `HttpRequest`/`HttpResponse` values, keeping
//!   the contract testable without a network.
//! - The mock-server workspace member implements the same endpoints for
//!   integration tests and local development; DTOs are defined independently
//!   so the tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::{ApiClient, EXTRACT_TIMEOUT_ERROR, TEMPLATES_FETCH_ERROR};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, UreqTransport};
pub use types::{
    ApiOutcome, ExtractRequest, GenerateEmailRequest, SendEmailRequest, DATA_URI_PREFIX,
};
