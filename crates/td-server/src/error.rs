//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use td_core::TdError;
use td_dispatch::DispatchError;

/// Anything a handler can fail with.
///
/// Everything maps to a 400 with a JSON `error` body: bad input, bad
/// configuration and algorithm failures are all the caller's to fix, and
/// none of them leave the store mutated.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Invalid(#[from] TdError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("no junctions configured and none provided")]
    NoJunctions,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
