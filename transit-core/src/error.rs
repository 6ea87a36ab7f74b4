use thiserror::Error;

/// Completion transport failures, classified before the caller absorbs them
/// into an empty response.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// HTTP request failed (connection error, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("completion request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Provider answered 2xx but the body did not parse.
    #[error("invalid completion response: {0}")]
    InvalidResponse(String),
}
