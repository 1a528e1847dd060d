//! Error types for the WebODM client.

use thiserror::Error;

/// Errors that can occur when interacting with a WebODM server.
///
/// Non-success HTTP statuses are not errors: request methods report them
/// as absent data (`None` / `false`) and reserve this type for transport
/// faults, construction problems, and undecodable response bodies.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client was closed and can no longer issue requests
    #[error("Client is closed")]
    Closed,

    /// IO error while reading or writing a preset file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for WebODM client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
