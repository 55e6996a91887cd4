//! Graph client error types.

use reqwest::StatusCode;
use thiserror::Error;

use crate::response::Envelope;

/// Result type for Graph client operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Graph client errors.
///
/// `MissingParameter`, `InvalidUrl` and `InvalidHeader` are caller errors
/// raised while building the request, before any network I/O. `Transport`
/// and `Status` are remote failures.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A parameter the descriptor marks as required was not supplied.
    #[error("Missing required parameter '{name}' for operation '{operation}'")]
    MissingParameter {
        /// Operation name.
        operation: &'static str,
        /// Parameter name.
        name: &'static str,
    },

    /// The base URL or the templated path did not form a valid URL.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL text.
        url: String,
        /// Parser message.
        message: String,
    },

    /// A header parameter had an invalid name or value.
    #[error("Invalid header '{name}': {message}")]
    InvalidHeader {
        /// Header name.
        name: String,
        /// Validation message.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Request failed with status {}", .0.response.status)]
    Status(Box<Envelope>),
}

impl GraphError {
    /// HTTP status of a `Status` error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(envelope) => Some(envelope.response.status),
            _ => None,
        }
    }

    /// Response envelope of a `Status` error.
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            Self::Status(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Whether the error was raised before any network I/O.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. } | Self::InvalidUrl { .. } | Self::InvalidHeader { .. }
        )
    }
}
