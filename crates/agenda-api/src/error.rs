//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Errors are answered as plain text. Store and upstream faults carry no
//! client-facing detail; the cause is only logged.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// The resource already exists. Answered with 200: clients of this API
  /// rely on the body text, not the status.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The phone-validation service failed or is not configured.
  #[error("upstream error: {0}")]
  Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::BadRequest(m) => {
        tracing::warn!(reason = %m, "rejecting request");
        (StatusCode::BAD_REQUEST, m).into_response()
      }
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m).into_response(),
      ApiError::Conflict(m) => (StatusCode::OK, m).into_response(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        internal_error()
      }
      ApiError::Upstream(e) => {
        tracing::error!(error = %e, "phone validation failure");
        internal_error()
      }
    }
  }
}

fn internal_error() -> Response {
  (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
