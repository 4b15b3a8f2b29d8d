//! Error types for the employee API client.
//!
//! # Design
//! The `Display` text of every variant is exactly what the form or list puts
//! on screen. Status codes ride along for hosts that want to log them, but
//! the components only ever surface the message.

/// Errors returned by `EmployeeClient` parse methods and `EmployeeApi` calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The list request came back with a non-2xx status.
    #[error("Failed to fetch employees")]
    FetchFailed { status: u16 },

    /// The single-record request came back with a non-2xx status.
    #[error("Employee not found")]
    NotFound { status: u16 },

    /// A create or update was refused. `message` is the server's `error`
    /// field when the body carried one, otherwise a fixed fallback.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// The text shown to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::FetchFailed { status }
            | ApiError::NotFound { status }
            | ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<crate::transport::TransportError> for ApiError {
    fn from(err: crate::transport::TransportError) -> Self {
        ApiError::Transport(err.to_string())
    }
}
