use thiserror::Error;

use crate::host::HostError;

#[derive(Debug, Error)]
pub enum TileError {
    #[error("Host primitive failed: {0}")]
    Host(#[from] HostError),
    #[error("No strategies configured")]
    EmptyRotation,
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("Invalid pane filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("Invalid strategy `{name}`: {reason}")]
    InvalidStrategy { name: String, reason: String },
}
