//! Error types for the application

use thiserror::Error;

use crate::trading::{Asset, Pair};

/// Result type alias using our ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for exchange and agent operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Malformed numeric or string input
    #[error("Parse error: {0}")]
    Parse(String),

    /// The pair has no symbol on this exchange
    #[error("Unsupported pair: {0}")]
    UnsupportedPair(Pair),

    /// The asset has no symbol on this exchange
    #[error("Unsupported asset: {0}")]
    UnsupportedAsset(Asset),

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The exchange explicitly refused the order or cancellation
    #[error("Order rejected: {0}")]
    OrderRejected(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A request that cannot succeed given the current setup
    #[error("Precondition failed: {0}")]
    DomainPrecondition(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Short, stable label used in structured log records
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Parse(_) => "parse",
            ClientError::UnsupportedPair(_) => "unsupported_pair",
            ClientError::UnsupportedAsset(_) => "unsupported_asset",
            ClientError::HttpRequest(_)
            | ClientError::JsonParse(_)
            | ClientError::InvalidResponse(_) => "transport",
            ClientError::OrderRejected(_) => "order_rejected",
            ClientError::Authentication(_) => "authentication",
            ClientError::Configuration(_) => "configuration",
            ClientError::DomainPrecondition(_) => "domain_precondition",
            ClientError::Internal(_) => "internal",
        }
    }

    /// Network, decode and protocol failures
    pub fn is_transport(&self) -> bool {
        self.kind() == "transport"
    }
}
