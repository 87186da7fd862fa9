//! Error types for chain-node RPC operations.

/// Errors that can occur when talking to a chain node.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The node rejected the request or reported an execution failure.
    #[error("node error ({code}): {message}")]
    Node {
        /// The node's numeric error code.
        code: i64,
        /// Human-readable error description.
        message: String,
    },

    /// A chain-layer failure while preparing or interpreting a payload.
    #[error("chain error: {0}")]
    Chain(#[from] eos_chain::ChainError),
}
