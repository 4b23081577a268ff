use thiserror::Error;

/// Top-level error type for tool invocations.
#[derive(Debug, Error)]
pub enum KakaoMapError {
    // --- Dispatch errors (reported to the caller, server keeps serving) ---
    #[error("Unknown tool: '{0}'")]
    UnknownTool(String),

    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument { parameter: String, reason: String },

    // --- Upstream errors (never retried) ---
    #[error(transparent)]
    ExternalApi(#[from] ExternalApiError),

    // --- Operational errors ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

impl KakaoMapError {
    /// Shorthand for an [`KakaoMapError::InvalidArgument`].
    pub fn invalid_argument(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable tag for this error, used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::DuplicateTool(_) => "duplicate_tool",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::ExternalApi(_) => "external_api",
            Self::Serialization(_) => "serialization",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the caller sent something we could not dispatch
    /// (as opposed to a failure while executing a valid call).
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::UnknownTool(_) | Self::InvalidArgument { .. })
    }
}

/// Failure talking to the external mapping API.
#[derive(Debug, Error)]
pub enum ExternalApiError {
    #[error("Mapping API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Mapping API request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Mapping API request failed: {0}")]
    Transport(String),
}

impl ExternalApiError {
    /// HTTP status code, when the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for tool operations.
pub type Result<T> = std::result::Result<T, KakaoMapError>;
