use thiserror::Error;

/// Failure taxonomy for collector API calls.
///
/// Callers branch on `is_transient` to decide between "retry later" and
/// "this request is invalid"; only transport problems are worth retrying.
#[derive(Debug, Error)]
pub enum ApiError {
    /// DNS, connect, TLS, or timeout failure before a usable response.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collector answered with a non-success envelope, or with an HTTP
    /// error status and no envelope at all. Carries the server message when
    /// one was provided.
    #[error("rejected by collector: {0}")]
    Rejected(String),

    /// A 2xx body that did not decode as the expected envelope.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
