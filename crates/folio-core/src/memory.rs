//! [`MemoryStore`] — a process-lifetime [`MessageStore`].
//!
//! Messages live in a lock-guarded `Vec`, so insertion order is list order.
//! Everything is lost when the process exits; use `folio-store-sqlite` for a
//! durable inbox.

use std::sync::{Arc, RwLock};

use crate::{
  Error, Result,
  message::{ContactMessage, NewContactMessage},
  store::MessageStore,
};

/// An in-memory inbox.
///
/// Clones share the same underlying messages.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  messages: Arc<RwLock<Vec<ContactMessage>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl MessageStore for MemoryStore {
  type Error = Error;

  async fn insert(&self, input: NewContactMessage) -> Result<ContactMessage> {
    let message = ContactMessage::stamp(input);
    self
      .messages
      .write()
      .map_err(|_| Error::LockPoisoned)?
      .push(message.clone());
    Ok(message)
  }

  async fn list_all(&self) -> Result<Vec<ContactMessage>> {
    let messages = self.messages.read().map_err(|_| Error::LockPoisoned)?;
    Ok(messages.clone())
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use chrono::Utc;

  use super::*;

  fn new_message(n: usize) -> NewContactMessage {
    NewContactMessage {
      name:    format!("Sender {n}"),
      email:   format!("sender{n}@example.com"),
      message: format!("Message body number {n}"),
    }
  }

  #[tokio::test]
  async fn empty_store_lists_nothing() {
    let store = MemoryStore::new();
    assert!(store.list_all().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn insert_then_list_contains_record_once() {
    let store = MemoryStore::new();
    let stored = store.insert(new_message(1)).await.unwrap();
    assert!(!stored.id.is_nil());
    assert!(stored.created_at <= Utc::now());

    let all = store.list_all().await.unwrap();
    assert_eq!(all.iter().filter(|m| m.id == stored.id).count(), 1);
    assert_eq!(all[0], stored);
  }

  #[tokio::test]
  async fn lists_in_insertion_order() {
    let store = MemoryStore::new();
    let mut ids = Vec::new();
    for n in 0..5 {
      ids.push(store.insert(new_message(n)).await.unwrap().id);
    }
    let listed: Vec<_> = store.list_all().await.unwrap().into_iter().map(|m| m.id).collect();
    assert_eq!(listed, ids);
  }

  #[tokio::test]
  async fn repeated_reads_are_identical() {
    let store = MemoryStore::new();
    store.insert(new_message(1)).await.unwrap();
    store.insert(new_message(2)).await.unwrap();
    assert_eq!(store.list_all().await.unwrap(), store.list_all().await.unwrap());
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn concurrent_inserts_keep_every_record_with_unique_ids() {
    let store = MemoryStore::new();
    let handles: Vec<_> = (0..64)
      .map(|n| {
        let store = store.clone();
        tokio::spawn(async move { store.insert(new_message(n)).await.unwrap() })
      })
      .collect();
    for handle in handles {
      handle.await.unwrap();
    }

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 64);
    let ids: HashSet<_> = all.iter().map(|m| m.id).collect();
    assert_eq!(ids.len(), 64);
  }
}
