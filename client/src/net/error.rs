//! Transport-level error types for the two external collaborators.

/// Failure talking to the profile backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Network(String),

    /// Still unauthorized after the silent refresh-and-retry.
    #[error("unauthorized")]
    Unauthorized,

    /// The requested resource does not exist (e.g. no profile yet).
    #[error("not found")]
    NotFound,

    /// Any other non-success status, with the backend `detail` text if present.
    #[error("request failed with status {status}")]
    Status { status: u16, detail: Option<String> },

    /// The response body did not match the expected schema.
    #[error("response parse failed: {0}")]
    Parse(String),
}

impl ApiError {
    /// HTTP status associated with this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::NotFound => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Parse(_) => None,
        }
    }

    /// Backend-provided human-readable detail, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Failure talking to the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("identity provider unreachable: {0}")]
    Network(String),

    #[error("identity provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("no active session")]
    NoSession,

    #[error("identity provider response parse failed: {0}")]
    Parse(String),

    /// Browser-only operation invoked during server rendering or native tests.
    #[error("identity provider not available outside the browser")]
    Unavailable,
}
