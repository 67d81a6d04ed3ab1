//! Optional HTTP Basic gate in front of the inbox listing.
//!
//! Reading messages is public unless the operator configures credentials.
//! Submitting a message is never gated.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::http::{HeaderMap, header};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

use crate::error::ApiError;

/// Credentials accepted for reading the inbox.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Who may list stored messages.
#[derive(Clone, Default)]
pub enum ReadAccess {
  /// Anyone. Matches the behaviour of the original public endpoint.
  #[default]
  Public,
  /// Only callers presenting these Basic credentials.
  Basic(AuthConfig),
}

impl ReadAccess {
  /// Admit or refuse a listing request based on its headers.
  pub fn check(&self, headers: &HeaderMap) -> Result<(), ApiError> {
    let ReadAccess::Basic(config) = self else {
      return Ok(());
    };
    match basic_credentials(headers) {
      Some((username, password)) if config.accepts(&username, &password) => Ok(()),
      _ => Err(ApiError::Unauthorized),
    }
  }
}

impl AuthConfig {
  /// Whether `username` / `password` match these credentials.
  ///
  /// An unparseable stored hash admits nobody.
  pub fn accepts(&self, username: &str, password: &str) -> bool {
    if username != self.username {
      return false;
    }
    PasswordHash::new(&self.password_hash).is_ok_and(|hash| {
      Argon2::default()
        .verify_password(password.as_bytes(), &hash)
        .is_ok()
    })
  }
}

/// Decode `Authorization: Basic <base64(user:pass)>`.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
  let encoded = headers
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Basic ")?;
  let decoded = String::from_utf8(B64.decode(encoded).ok()?).ok()?;
  let (username, password) = decoded.split_once(':')?;
  Some((username.to_owned(), password.to_owned()))
}
