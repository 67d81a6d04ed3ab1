//! The `/contact` endpoint.
//!
//! | Method    | Response |
//! |-----------|----------|
//! | `POST`    | 201 `{success, message}` · 400 `{success, error, details}` · 413 `{success, error}` · 500 |
//! | `GET`     | 200 `{success, messages}` · 401 when the read gate is on · 500 |
//! | `OPTIONS` | 200, empty body (CORS preflight) |
//! | other     | 405 `{error}` |

use axum::{
  Json,
  extract::{State, rejection::BytesRejection},
  http::{HeaderMap, Method, StatusCode},
  response::{IntoResponse, Response},
};
use bytes::Bytes;
use folio_core::{ContactMessage, MessageStore, validate::validate};
use serde::Serialize;
use serde_json::Value;

use crate::{AppState, error::{ApiError, StoreOp}};

// ─── Routing table ───────────────────────────────────────────────────────────

/// What a request to `/contact` is asking for, decided by method alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
  Create,
  List,
  Preflight,
  Unsupported,
}

impl Route {
  pub fn classify(method: &Method) -> Self {
    match *method {
      Method::POST => Route::Create,
      Method::GET => Route::List,
      Method::OPTIONS => Route::Preflight,
      _ => Route::Unsupported,
    }
  }
}

// ─── Response bodies ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Created<'a> {
  success: bool,
  message: &'a ContactMessage,
}

#[derive(Serialize)]
struct Listed {
  success:  bool,
  messages: Vec<ContactMessage>,
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

/// Entry point for every method on `/contact`.
pub async fn dispatch<S>(
  State(state): State<AppState<S>>,
  method: Method,
  headers: HeaderMap,
  body: Result<Bytes, BytesRejection>,
) -> Response
where
  S: MessageStore + 'static,
{
  let result = match Route::classify(&method) {
    Route::Create => match body {
      Ok(body) => create(state.store.as_ref(), &body).await,
      Err(rejection) => Err(ApiError::Body(rejection)),
    },
    Route::List => match state.read_access.check(&headers) {
      Ok(()) => list(state.store.as_ref()).await,
      Err(e) => Err(e),
    },
    Route::Preflight => Ok(StatusCode::OK.into_response()),
    Route::Unsupported => Err(ApiError::MethodNotAllowed(method)),
  };

  result.unwrap_or_else(IntoResponse::into_response)
}

/// `POST /contact`: validate, store, and echo the stored record.
///
/// A body that is not valid JSON is validated as if it were empty, so the
/// caller gets the usual per-field `required` details rather than an opaque
/// parse error.
async fn create<S: MessageStore>(store: &S, body: &[u8]) -> Result<Response, ApiError> {
  let payload: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

  let input = validate(&payload).inspect_err(|e| {
    tracing::warn!(fields = ?e.fields().collect::<Vec<_>>(), "rejected contact message");
  })?;

  let message = store
    .insert(input)
    .await
    .map_err(|e| ApiError::store(StoreOp::Insert, e))?;

  tracing::info!(id = %message.id, "contact message stored");
  Ok((StatusCode::CREATED, Json(Created { success: true, message: &message })).into_response())
}

/// `GET /contact`: every stored message, oldest first.
async fn list<S: MessageStore>(store: &S) -> Result<Response, ApiError> {
  let messages = store
    .list_all()
    .await
    .map_err(|e| ApiError::store(StoreOp::List, e))?;
  Ok(Json(Listed { success: true, messages }).into_response())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classifies_by_method() {
    assert_eq!(Route::classify(&Method::POST), Route::Create);
    assert_eq!(Route::classify(&Method::GET), Route::List);
    assert_eq!(Route::classify(&Method::OPTIONS), Route::Preflight);
    for m in [Method::PUT, Method::DELETE, Method::PATCH, Method::HEAD] {
      assert_eq!(Route::classify(&m), Route::Unsupported, "{m}");
    }
  }
}
