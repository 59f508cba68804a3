//! Error types for the travel API client.
//!
//! # Design
//! Transport failures come in exactly three kinds: the server answered with
//! an error status, nothing answered at all, or something else went wrong.
//! Each kind gets its own variant and its own user-facing message, so a UI
//! can show the text directly without inspecting the variant.

use thiserror::Error;

/// Result type for domain write operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Message shown when no response was received.
pub const UNREACHABLE_MESSAGE: &str = "Tidak dapat terhubung ke server";

/// Message shown for failures that are neither rejections nor unreachability.
pub const UNEXPECTED_MESSAGE: &str = "Terjadi kesalahan yang tidak terduga";

/// Errors surfaced by the transport and the write operations built on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned a non-2xx status. `message` is the server's own
    /// text when it supplied one.
    #[error("{message}")]
    ServerRejected { status: u16, message: String },

    /// No response was received: refused connection, DNS failure, timeout.
    #[error("{}", UNREACHABLE_MESSAGE)]
    Unreachable,

    /// Anything else. `detail` is for logs, not for end users.
    #[error("{}", UNEXPECTED_MESSAGE)]
    Unexpected { detail: String },
}

impl ApiError {
    pub fn unexpected(detail: impl Into<String>) -> Self {
        ApiError::Unexpected {
            detail: detail.into(),
        }
    }

    /// HTTP status of a server rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ServerRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::unexpected(error.to_string())
    }
}

/// Failure reported by an [`HttpExecutor`](crate::transport::HttpExecutor)
/// before any status code could be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// The request went out but nothing came back.
    #[error("no response received: {0}")]
    NoResponse(String),

    #[error("request failed: {0}")]
    Failed(String),
}

impl From<ExecutorError> for ApiError {
    fn from(error: ExecutorError) -> Self {
        match error {
            ExecutorError::NoResponse(_) => ApiError::Unreachable,
            ExecutorError::Failed(detail) => ApiError::Unexpected { detail },
        }
    }
}
