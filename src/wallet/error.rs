//! Error types for wallet node operations.

use super::types::Endpoint;

/// Errors that can occur when talking to the wallet node API.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The node answered with a `Result` other than `Success`.
    #[error("{endpoint} returned {result}{}", detail(.message))]
    Rejected {
        endpoint: Endpoint,
        result: String,
        message: Option<String>,
    },

    /// The node reported success but left out the field we asked for.
    #[error("{endpoint} succeeded without a {field} field")]
    MissingField {
        endpoint: Endpoint,
        field: &'static str,
    },
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}
