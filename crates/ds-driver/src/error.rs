//! Error types for ds-driver.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    /// No completed trips yet.  Callers treat this as "insufficient data",
    /// not as a fault.
    #[error("earnings history is empty")]
    EmptyHistory,

    #[error("{what} length {got} does not match driver count {expected}")]
    DriverCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },
}

pub type DriverResult<T> = Result<T, DriverError>;
