//! Error types for the intake controller.
//!
//! # Design
//! None of these reach the page directly. `TransportError` is what a host
//! reports when a request never completed; `ApiError` describes a 2xx body the
//! interpreter could not use. The controller turns both into a generic
//! `ResponseOutcome::ErrorMessage` after logging the detail.

use thiserror::Error;

/// Failure reported by a host transport. The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, reset, and the like.
    #[error("network error: {0}")]
    Network(String),

    /// The host's own timeout elapsed. The core sets none.
    #[error("request timed out")]
    Timeout,

    /// The host failed before sending, e.g. it could not read a file.
    #[error("client error: {0}")]
    Client(String),
}

/// A success response whose body did not name a result location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The body was not JSON, or not the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The JSON carried an empty `url`.
    #[error("response did not include a result location")]
    MissingLocation,
}

/// Configuration could not be loaded or is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("failed to parse inline configuration: {0}")]
    Inline(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}
