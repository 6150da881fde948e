//! Error types for explorer queries.

/// Errors that can occur when querying the block explorer.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Explorer answered with a non-2xx status.
    #[error("server error ({status_code}): {message}")]
    ServerError { status_code: u16, message: String },

    /// Block listing came back empty.
    #[error("explorer returned no blocks")]
    NoBlocks,
}
