//! Error types for the Squall simulator.
//!
//! All crates return `SquallResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Squall simulator.
#[derive(Debug, Error)]
pub enum SquallError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A fixed-capacity structure was asked to hold more objects than it was sized for.
    #[error("Capacity exceeded: {requested} objects requested, capacity is {capacity}")]
    CapacityExceeded {
        requested: usize,
        capacity: usize,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A simulation invariant was violated.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl SquallError {
    /// Returns true for errors caused by caller-supplied input rather than runtime state.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SquallError::InvalidMesh(_) | SquallError::InvalidConfig(_)
        )
    }
}

/// Convenience alias for `Result<T, SquallError>`.
pub type SquallResult<T> = Result<T, SquallError>;
