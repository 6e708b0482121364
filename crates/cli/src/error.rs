//! CLI error types.

use crate::config::ConfigError;
use thiserror::Error;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is invalid or unreadable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The `--input` value is not valid JSON.
    #[error("invalid input data: {0}")]
    InvalidInput(String),

    /// An error occurred loading the tool registry or compiling a prompt.
    #[error(transparent)]
    Registry(#[from] registry::Error),

    /// The completion gateway could not be set up.
    #[error(transparent)]
    Gateway(#[from] gateway::GatewayError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
