//! [`SqliteStore`] — the SQLite implementation of [`MessageStore`].

use std::path::Path;

use folio_core::{ContactMessage, MessageStore, NewContactMessage};

use crate::{
  Result,
  encode::{RawContactMessage, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact inbox backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All
/// statements run in order on the connection's own thread, so concurrent
/// inserts never interleave.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── MessageStore impl ───────────────────────────────────────────────────────

impl MessageStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, input: NewContactMessage) -> Result<ContactMessage> {
    let message = ContactMessage::stamp(input);

    let id_str = encode_uuid(message.id);
    let at_str = encode_dt(message.created_at);
    let name   = message.name.clone();
    let email  = message.email.clone();
    let body   = message.message.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contact_messages (id, name, email, message, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, email, body, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(message)
  }

  async fn list_all(&self) -> Result<Vec<ContactMessage>> {
    let raws: Vec<RawContactMessage> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, email, message, created_at
           FROM contact_messages
           ORDER BY seq ASC",
        )?;
        let rows = stmt
          .query_map([], RawContactMessage::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContactMessage::into_message).collect()
  }
}
