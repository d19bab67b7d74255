//! Error type shared by the kernel crates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkyfireError {
    /// A state transition was requested without a target state.
    #[error("state change requested without a target state")]
    MissingState,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
