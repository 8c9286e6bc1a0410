//! Error types and Result alias for the GiftFest bot

use thiserror::Error;

/// Main error type for the GiftFest bot
///
/// Only `SessionInvalid` terminates a session's run loop; everything else
/// is recoverable and handled at the call site or cycle boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Session invalid: {0}")]
    SessionInvalid(String),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error must abort the whole run for the account
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::SessionInvalid(_))
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
