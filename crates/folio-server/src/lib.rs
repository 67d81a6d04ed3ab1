//! Server wiring for Folio: configuration, store selection, and the HTTP app.
//!
//! The binary in `main.rs` is a thin shell around [`ServerConfig::load`] and
//! [`serve`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use axum::Router;
use folio_api::{AppState, AuthConfig, ReadAccess};
use folio_core::{MemoryStore, MessageStore};
use folio_store_sqlite::SqliteStore;
use rand_core::OsRng;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Where contact messages are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
  /// In-process only; messages are lost on restart.
  #[default]
  Memory,
  /// A SQLite file at `store_path`.
  Sqlite,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `FOLIO_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  #[serde(default)]
  pub store:              StoreBackend,
  #[serde(default = "default_store_path")]
  pub store_path:         PathBuf,
  /// Set together with `read_password_hash` to require Basic auth on `GET`.
  #[serde(default)]
  pub read_username:      Option<String>,
  #[serde(default)]
  pub read_password_hash: Option<String>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3000 }

fn default_store_path() -> PathBuf { PathBuf::from("folio.db") }

impl ServerConfig {
  /// Layer the optional TOML file at `path` under the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("FOLIO").try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The inbox read gate. On only when both credentials are configured.
  pub fn read_access(&self) -> ReadAccess {
    match (&self.read_username, &self.read_password_hash) {
      (Some(username), Some(password_hash)) => ReadAccess::Basic(AuthConfig {
        username:      username.clone(),
        password_hash: password_hash.clone(),
      }),
      _ => ReadAccess::Public,
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

/// The argon2 PHC string to put in `read_password_hash`.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// The full HTTP application: the API under `/api`, with request tracing.
pub fn app<S>(state: AppState<S>) -> Router
where
  S: MessageStore + 'static,
{
  Router::new()
    .nest("/api", folio_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}

/// Open the configured store and serve until the listener fails.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
  match config.store {
    StoreBackend::Memory => {
      tracing::warn!("using in-memory store; messages will not survive a restart");
      serve(MemoryStore::new(), &config).await
    }
    StoreBackend::Sqlite => {
      let path = expand_tilde(&config.store_path);
      let store = SqliteStore::open(&path)
        .await
        .with_context(|| format!("failed to open store at {path:?}"))?;
      tracing::info!(path = %path.display(), "opened sqlite store");
      serve(store, &config).await
    }
  }
}

/// Bind `config.address()` and serve the app over `store`.
pub async fn serve<S>(store: S, config: &ServerConfig) -> anyhow::Result<()>
where
  S: MessageStore + 'static,
{
  let read_access = config.read_access();
  if matches!(read_access, ReadAccess::Public) {
    tracing::info!("inbox listing is public; set read credentials to restrict it");
  }

  let state = AppState::new(Arc::new(store)).with_read_access(read_access);
  let address = config.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app(state)).await.context("server error")?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tower::ServiceExt as _;

  fn from_toml(src: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(src, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.address(), "127.0.0.1:3000");
    assert_eq!(cfg.store, StoreBackend::Memory);
    assert_eq!(cfg.store_path, PathBuf::from("folio.db"));
    assert!(matches!(cfg.read_access(), ReadAccess::Public));
  }

  #[test]
  fn parses_full_config() {
    let cfg = from_toml(
      r#"
      host = "0.0.0.0"
      port = 8080
      store = "sqlite"
      store_path = "~/folio/inbox.db"
      read_username = "owner"
      read_password_hash = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"
      "#,
    );
    assert_eq!(cfg.address(), "0.0.0.0:8080");
    assert_eq!(cfg.store, StoreBackend::Sqlite);
    match cfg.read_access() {
      ReadAccess::Basic(auth) => assert_eq!(auth.username, "owner"),
      ReadAccess::Public => panic!("expected the read gate to be on"),
    }
  }

  #[test]
  fn half_configured_gate_stays_public() {
    let cfg = from_toml(r#"read_username = "owner""#);
    assert!(matches!(cfg.read_access(), ReadAccess::Public));
  }

  #[test]
  fn missing_config_file_is_not_an_error() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/folio/config.toml")).unwrap();
    assert_eq!(cfg.port, 3000);
  }

  #[test]
  fn tilde_expansion() {
    let plain = Path::new("/var/lib/folio.db");
    assert_eq!(expand_tilde(plain), plain);
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(expand_tilde(Path::new("~/inbox.db")), PathBuf::from(home).join("inbox.db"));
    }
  }

  #[test]
  fn hashed_password_opens_the_read_gate() {
    let cfg = ServerConfig {
      read_username: Some("owner".to_string()),
      read_password_hash: Some(hash_password("hunter2").unwrap()),
      ..from_toml("")
    };
    match cfg.read_access() {
      ReadAccess::Basic(auth) => {
        assert!(auth.accepts("owner", "hunter2"));
        assert!(!auth.accepts("owner", "hunter3"));
      }
      ReadAccess::Public => panic!("expected the read gate to be on"),
    }
  }

  #[test]
  fn hashes_are_salted() {
    assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
  }

  #[tokio::test]
  async fn app_mounts_contact_under_api() {
    let state = AppState::new(Arc::new(MemoryStore::new()));
    let req = Request::builder()
      .method("GET")
      .uri("/api/contact")
      .body(Body::empty())
      .unwrap();
    let resp = app(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({ "success": true, "messages": [] }));
  }

  #[tokio::test]
  async fn unknown_path_is_404() {
    let state = AppState::new(Arc::new(MemoryStore::new()));
    let req = Request::builder().uri("/contact").body(Body::empty()).unwrap();
    let resp = app(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
