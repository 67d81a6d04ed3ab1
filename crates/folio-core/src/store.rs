//! The `MessageStore` trait.
//!
//! The trait is implemented by storage backends ([`crate::MemoryStore`],
//! `folio-store-sqlite`). The HTTP layer depends on this abstraction, not on
//! any concrete backend, so tests can inject whichever store they need.

use std::future::Future;

use crate::message::{ContactMessage, NewContactMessage};

/// Abstraction over an append-only contact-message inbox.
///
/// There is no update or delete operation: once [`insert`](Self::insert)
/// returns, the record is fixed for the lifetime of the store.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait MessageStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a validated message and return the stored record.
  ///
  /// The store assigns a fresh `id` and `created_at`. Concurrent callers never
  /// receive the same `id`, and no insert is lost.
  fn insert(
    &self,
    input: NewContactMessage,
  ) -> impl Future<Output = Result<ContactMessage, Self::Error>> + Send + '_;

  /// Every stored message, oldest first. Empty when nothing has been stored.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<ContactMessage>, Self::Error>> + Send + '_;
}
