//! Error types for netwatch
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in netwatch
#[derive(Debug, Error)]
pub enum NetwatchError {
    /// Writing to the outage log failed
    #[error("Recorder error: {0}")]
    Recorder(String),

    /// Configuration rejected before the monitor started
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A termination request stopped the monitor
    #[error("Interrupted by termination request")]
    Interrupted,
}

impl NetwatchError {
    /// Whether this error is the re-propagated termination request rather than a failure
    pub fn is_interrupted(&self) -> bool {
        matches!(self, NetwatchError::Interrupted)
    }
}

/// Result type alias for netwatch operations
pub type Result<T> = std::result::Result<T, NetwatchError>;
