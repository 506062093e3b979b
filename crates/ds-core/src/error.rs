//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `DsError` as one variant
//! where they need to surface it.

use thiserror::Error;

/// The top-level error type for `ds-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum DsError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ds-*` crates.
pub type DsResult<T> = Result<T, DsError>;
