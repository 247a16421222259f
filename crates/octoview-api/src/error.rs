use thiserror::Error;

/// Top-level error type for the `octoview-api` crate.
///
/// Covers every failure mode across both API surfaces. Messages carried
/// by [`Domain`](Self::Domain) and [`Http`](Self::Http) are already
/// user-facing — `octoview-core` surfaces them directly as store state.
#[derive(Debug, Error)]
pub enum Error {
    /// Backend-reported business-rule violation (duplicate email/username,
    /// unconfirmed account, blocked account, bad credentials). The message
    /// has been resolved through the [`MessageCatalog`](crate::MessageCatalog).
    #[error("{message}")]
    Domain { message: String },

    /// Network or HTTP status failure. `status == 0` means the request
    /// never reached the server (connection refused, DNS failure, timeout).
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Repository URL could not be parsed into an owner/repo pair.
    #[error("invalid repository URL, expected format host/owner/repo")]
    RepoUrl,

    /// URL construction error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON deserialization failed.
    #[error("deserialization error: {message}")]
    Deserialization { message: String },

    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// The HTTP status code, if this error carries one.
    /// `Some(0)` indicates a connectivity failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
