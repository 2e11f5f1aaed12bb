//! Adapter error types

use thiserror::Error;

/// Errors returned by [`HttpAdapter`](crate::HttpAdapter) operations
#[derive(Debug, Error)]
pub enum Error {
    /// The response did not carry an `application/json` body.
    ///
    /// Raised for every status code, including 2xx, whenever the content
    /// type is missing or is not JSON.
    #[error("Network error ({status}): {reason}")]
    Network {
        /// HTTP reason phrase of the response
        reason: String,
        /// HTTP status code of the response
        status: u16,
    },
    /// The underlying transport failed to deliver the request
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// Reason phrase carried by a [`Error::Network`] error
    pub fn reason(&self) -> Option<&str> {
        match self {
            Error::Network { reason, .. } => Some(reason),
            Error::Transport(_) => None,
        }
    }

    /// HTTP status code associated with the failure, if any
    pub fn code(&self) -> Option<u16> {
        match self {
            Error::Network { status, .. } => Some(*status),
            Error::Transport(TransportError::Status { status, .. }) => Some(*status),
            Error::Transport(_) => None,
        }
    }
}

/// Transport level failures
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP error with status code
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Proxy error
    #[error("Proxy error: {0}")]
    Proxy(String),

    /// Client build error
    #[error("Client build error: {0}")]
    Build(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::Build(err.to_string())
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.into())
    }
}
