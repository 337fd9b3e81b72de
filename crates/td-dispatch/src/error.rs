//! Dispatch-subsystem error type.

use thiserror::Error;

/// Errors produced by `td-dispatch`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("configuration error: {0}")]
    Config(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
