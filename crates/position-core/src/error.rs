//! Remote Errors
//!
//! Failures surfaced by the remote collaborator. The store never repairs or
//! retries these; it hands them back to the caller untouched.

/// Common result type for remote operations
pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The request could not be sent or no response arrived
    #[error("Network failure: {0}")]
    Network(String),

    /// The collaborator answered with a non-success status
    #[error("Rejected: HTTP {status} - {body}")]
    Rejected { status: u16, body: String },

    /// A response arrived but its body was not a valid position payload
    #[error("Decode error: {0}")]
    Decode(String),
}

impl RemoteError {
    pub fn not_found(what: impl Into<String>) -> Self {
        RemoteError::Rejected {
            status: 404,
            body: what.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::Rejected { status: 404, .. })
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            RemoteError::Rejected {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            RemoteError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Decode(err.to_string())
    }
}
