//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Validation failures carry their full detail back to the caller. Storage
//! failures never do: the cause is logged and the client sees a fixed message.

use std::fmt;

use axum::{
  Json,
  extract::rejection::BytesRejection,
  http::{HeaderValue, Method, StatusCode, header},
  response::{IntoResponse, Response},
};
use folio_core::ValidationError;
use serde_json::json;
use thiserror::Error;

/// Which store operation failed; selects the client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
  Insert,
  List,
}

impl StoreOp {
  pub fn public_message(self) -> &'static str {
    match self {
      StoreOp::Insert => "Failed to send message",
      StoreOp::List => "Failed to retrieve messages",
    }
  }
}

impl fmt::Display for StoreOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StoreOp::Insert => f.write_str("insert"),
      StoreOp::List => f.write_str("list"),
    }
  }
}

/// An error returned by the contact handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("store {op} failed: {source}")]
  Store {
    op:     StoreOp,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  /// The request body could not be buffered, usually because it exceeds the
  /// size limit.
  #[error("unreadable request body: {0}")]
  Body(BytesRejection),

  #[error("method not allowed: {0}")]
  MethodNotAllowed(Method),

  #[error("unauthorized")]
  Unauthorized,
}

impl ApiError {
  pub fn store<E>(op: StoreOp, source: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store { op, source: Box::new(source) }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(e) => (
        StatusCode::BAD_REQUEST,
        Json(json!({
          "success": false,
          "error":   "Validation failed",
          "details": e.violations,
        })),
      )
        .into_response(),
      ApiError::Store { op, source } => {
        tracing::error!(%op, error = %source, "contact store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "success": false, "error": op.public_message() })),
        )
          .into_response()
      }
      ApiError::Body(rejection) => {
        let status = rejection.status();
        let error = if status == StatusCode::PAYLOAD_TOO_LARGE {
          "Message too large"
        } else {
          "Failed to read request body"
        };
        tracing::warn!(%status, reason = %rejection.body_text(), "unreadable contact body");
        (status, Json(json!({ "success": false, "error": error }))).into_response()
      }
      ApiError::MethodNotAllowed(_) => (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, HeaderValue::from_static("GET, POST, OPTIONS"))],
        Json(json!({ "error": "Method not allowed" })),
      )
        .into_response(),
      ApiError::Unauthorized => (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic realm=\"folio\""))],
        Json(json!({ "success": false, "error": "Unauthorized" })),
      )
        .into_response(),
    }
  }
}
