use std::time::Duration;
use thiserror::Error;

/// Errors from completion API calls.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The HTTP client could not be constructed.
    #[error("client setup: {0}")]
    Client(String),

    /// A network error occurred during the API call.
    #[error("network: {0}")]
    Network(String),

    /// The call did not finish within the configured timeout.
    #[error("completion request timed out after {0:?}")]
    Timeout(Duration),

    /// The provider answered with a non-success status.
    ///
    /// `message` is the provider's own error text when it sent one.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The provider response could not be parsed.
    #[error("invalid completion response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
