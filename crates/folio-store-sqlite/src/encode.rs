//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use folio_core::ContactMessage;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw row ──────────────────────────────────────────────────────────────────

/// A `contact_messages` row as read from SQLite, before decoding.
pub struct RawContactMessage {
  pub id:         String,
  pub name:       String,
  pub email:      String,
  pub message:    String,
  pub created_at: String,
}

impl RawContactMessage {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      message:    row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_message(self) -> Result<ContactMessage> {
    Ok(ContactMessage {
      id:         decode_uuid(&self.id)?,
      name:       self.name,
      email:      self.email,
      message:    self.message,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn timestamp_survives_text_column() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
  }

  #[test]
  fn garbage_timestamp_is_a_date_error() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }

  #[test]
  fn garbage_uuid_is_a_uuid_error() {
    assert!(matches!(decode_uuid("not-a-uuid"), Err(Error::Uuid(_))));
  }
}
