use thiserror::Error;

use crate::types::QueryIntent;

/// Top-level error type for the gateway core.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Query classified as {actual} but the operation requires {expected}")]
    Classification {
        expected: QueryIntent,
        actual: QueryIntent,
    },

    #[error("{0}")]
    Policy(String),

    #[error("{0}")]
    Store(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
