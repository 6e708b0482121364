//! Registry error types.

use thiserror::Error;

/// Registry errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// No tool is registered under the requested id.
    #[error("unknown tool: {0}")]
    NotFound(String),

    /// The registry data is invalid (duplicate id, out-of-range parameter).
    #[error("invalid registry: {0}")]
    Invalid(String),

    /// A prompt template cannot be compiled.
    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// Failed to parse a registry file.
    #[error("failed to parse registry: {0}")]
    Parse(String),

    /// An I/O error occurred while reading a registry file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
