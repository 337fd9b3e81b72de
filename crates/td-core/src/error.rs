//! Core error type.
//!
//! Sub-crates define their own error enums (`TopoError`, `DispatchError`)
//! and either wrap `TdError` as one variant or stay separate.  Both patterns
//! are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `td-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum TdError {
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Shorthand result type for all `td-*` crates.
pub type TdResult<T> = Result<T, TdError>;
