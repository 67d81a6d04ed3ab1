//! Contact messages, the only records the inbox holds.
//!
//! A message is immutable once stored. There is no update or delete path; the
//! store assigns `id` and `created_at` and nothing else ever touches them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── ContactMessage ──────────────────────────────────────────────────────────

/// A stored contact message, as returned by [`crate::store::MessageStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
  pub id:         Uuid,
  pub name:       String,
  pub email:      String,
  pub message:    String,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}

impl ContactMessage {
  /// Stamp a validated record with a fresh id and the current time.
  pub fn stamp(input: NewContactMessage) -> Self {
    Self {
      id:         Uuid::new_v4(),
      name:       input.name,
      email:      input.email,
      message:    input.message,
      created_at: Utc::now(),
    }
  }
}

// ─── NewContactMessage ───────────────────────────────────────────────────────

/// Input to [`crate::store::MessageStore::insert`].
///
/// Only [`crate::validate::validate`] builds one from untrusted input, so a
/// value of this type has already passed every field rule. `id` and
/// `created_at` are always set by the store; they are not accepted from
/// callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContactMessage {
  pub name:    String,
  pub email:   String,
  pub message: String,
}
