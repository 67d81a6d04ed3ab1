//! JSON API for the Folio contact inbox.
//!
//! Exposes an axum [`Router`] backed by any [`folio_core::MessageStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", folio_api::api_router(AppState::new(store)))
//! ```

pub mod auth;
pub mod contact;
pub mod cors;
pub mod error;

use std::sync::Arc;

use axum::{Router, routing::any};
use folio_core::MessageStore;

pub use auth::{AuthConfig, ReadAccess};
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the contact handler.
pub struct AppState<S> {
  pub store:       Arc<S>,
  pub read_access: Arc<ReadAccess>,
}

impl<S> AppState<S> {
  /// State with a public inbox listing.
  pub fn new(store: Arc<S>) -> Self {
    Self { store, read_access: Arc::new(ReadAccess::Public) }
  }

  pub fn with_read_access(mut self, access: ReadAccess) -> Self {
    self.read_access = Arc::new(access);
    self
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:       Arc::clone(&self.store),
      read_access: Arc::clone(&self.read_access),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: MessageStore + 'static,
{
  let router = Router::new()
    .route("/contact", any(contact::dispatch::<S>))
    .with_state(state);
  cors::with_cors(router)
}

// ─── Integration tests ────────────────────────────────────────────────────────
