//! Error types for the client.
//!
//! # Design
//! `ApiError` never crosses the public operation boundary: every variant is
//! folded into the uniform result mapping before the caller sees it. The
//! dedicated `Timeout` variant exists because `extract_data` substitutes its
//! own message for timeouts while the other operations report the error's
//! display text. `ConfigError` covers the one fallible construction path,
//! loading a `ClientConfig` from disk.

use thiserror::Error;

/// Failures observed while performing a round trip.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The round trip did not complete within the operation's timeout.
    #[error("request timed out")]
    Timeout,

    /// Connect, TLS, or read failure reported by the transport.
    #[error("{0}")]
    Transport(String),

    /// The request payload could not be encoded to JSON.
    #[error("failed to encode request body: {0}")]
    Serialization(String),
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Timeout(_) => ApiError::Timeout,
            ureq::Error::Io(ref io) if io.kind() == std::io::ErrorKind::TimedOut => {
                ApiError::Timeout
            }
            other => ApiError::Transport(other.to_string()),
        }
    }
}

/// Failure loading a `ClientConfig` from a file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
