//! Client configuration.
//!
//! # Design
//! Timeouts are stored as whole seconds and converted with
//! `Duration::from_secs` at the call site. `Default` points at the hosted
//! backend with the deployment's per-operation timeouts; a TOML file may
//! override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Address of the hosted backend.
pub const DEFAULT_BASE_URL: &str = "https://event-poster-extractor.onrender.com/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base address of the backend.
    pub base_url: String,
    /// Timeout for the health check (`test_connection`).
    pub health_timeout_secs: u64,
    /// Timeout for image extraction. Generous, extraction is slow.
    pub extract_timeout_secs: u64,
    /// Timeout for email generation.
    pub generate_timeout_secs: u64,
    /// Timeout for email sending.
    pub send_timeout_secs: u64,
    /// Timeout for template listing.
    pub templates_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            health_timeout_secs: 2,
            extract_timeout_secs: 60,
            generate_timeout_secs: 10,
            send_timeout_secs: 30,
            templates_timeout_secs: 5,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file. Fields absent from the file keep
    /// their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
