//! Client error types

use shared::EnvelopeError;
use thiserror::Error;

/// Message shown for any failed login, whatever the underlying cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Server rejected the bearer token (or there was none)
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error, either local form checks or a 4xx from the server
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server answered with an error message
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session file could not be read or written
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Login failed
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    /// Login succeeded at the HTTP level but the payload was incomplete
    #[error("Login failed: token or user data not received")]
    IncompleteLogin,

    /// Operation needs a logged-in session
    #[error("Not logged in")]
    NotLoggedIn,

    /// Item operations need an open order
    #[error("No open order")]
    NoOpenOrder,

    /// Inactive tables cannot take orders
    #[error("Table {0} is inactive")]
    TableInactive(i64),

    /// A request for this action is already in flight
    #[error("Request already in progress")]
    Busy,
}

impl From<EnvelopeError> for ClientError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Failure { code, message } => ClientError::Api {
                // Failure envelopes from the status/data convention carry no code
                code: code.unwrap_or(200),
                message,
            },
            EnvelopeError::MissingData => {
                ClientError::InvalidResponse("response carried no data".into())
            }
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
