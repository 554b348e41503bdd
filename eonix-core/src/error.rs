//! Error type for Eonix operations
//!
//! Errors are values that propagate through computations; no operation
//! retries or returns a partial result after a failure.

use thiserror::Error;

/// Error type for temporal operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EonixError {
    /// Construction input did not parse to a valid instant
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Sort or diff called with zero date arguments
    #[error("Nothing to sort: provide at least one date argument")]
    EmptyInput,

    /// Malformed amount passed to an add operation
    #[error("Invalid amount: {0}")]
    InvalidArgument(String),
}
