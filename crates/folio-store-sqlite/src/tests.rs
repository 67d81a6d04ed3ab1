//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use std::collections::HashSet;

use chrono::Utc;
use folio_core::{MessageStore, NewContactMessage};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_message(name: &str) -> NewContactMessage {
  NewContactMessage {
    name:    name.into(),
    email:   format!("{}@example.com", name.to_lowercase()),
    message: format!("Hello from {name}, nice portfolio!"),
  }
}

// ─── Insert / list ───────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_lists_nothing() {
  let s = store().await;
  assert!(s.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn insert_and_list() {
  let s = store().await;

  let stored = s.insert(new_message("Alice")).await.unwrap();
  assert!(!stored.id.is_nil());
  assert!(stored.created_at <= Utc::now());
  assert_eq!(stored.name, "Alice");

  let all = s.list_all().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0], stored);
}

#[tokio::test]
async fn lists_oldest_first() {
  let s = store().await;
  let names = ["Alice", "Bob", "Carol", "Dave"];
  for name in names {
    s.insert(new_message(name)).await.unwrap();
  }

  let listed: Vec<_> = s
    .list_all()
    .await
    .unwrap()
    .into_iter()
    .map(|m| m.name)
    .collect();
  assert_eq!(listed, names);
}

#[tokio::test]
async fn repeated_reads_are_identical() {
  let s = store().await;
  s.insert(new_message("Alice")).await.unwrap();
  s.insert(new_message("Bob")).await.unwrap();

  let first = s.list_all().await.unwrap();
  let second = s.list_all().await.unwrap();
  assert_eq!(first, second);
}

#[tokio::test]
async fn ids_are_unique_under_concurrent_inserts() {
  let s = store().await;
  let handles: Vec<_> = (0..32)
    .map(|n| {
      let s = s.clone();
      tokio::spawn(async move { s.insert(new_message(&format!("Sender{n}"))).await })
    })
    .collect();
  for h in handles {
    h.await.unwrap().unwrap();
  }

  let all = s.list_all().await.unwrap();
  assert_eq!(all.len(), 32);
  let ids: HashSet<Uuid> = all.iter().map(|m| m.id).collect();
  assert_eq!(ids.len(), 32);
}

#[tokio::test]
async fn text_is_stored_verbatim() {
  let s = store().await;
  let input = NewContactMessage {
    name:    "  Zoë O'Brien ".into(),
    email:   "zoe@example.com".into(),
    message: "Line one\nLine two; DROP TABLE contact_messages; --".into(),
  };
  s.insert(input.clone()).await.unwrap();

  let all = s.list_all().await.unwrap();
  assert_eq!(all[0].name, input.name);
  assert_eq!(all[0].message, input.message);
}

// ─── Durability ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn messages_survive_reopen() {
  let path = std::env::temp_dir().join(format!("folio-test-{}.db", Uuid::new_v4()));

  let stored = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert(new_message("Alice")).await.unwrap();
    s.insert(new_message("Bob")).await.unwrap()
  };

  let reopened = SqliteStore::open(&path).await.unwrap();
  let all = reopened.list_all().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[1], stored);

  drop(reopened);
  for suffix in ["", "-wal", "-shm"] {
    let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
  }
}
