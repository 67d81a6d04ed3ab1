//! Async HTTP client wrapping the Folio contact API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use folio_core::{ContactMessage, NewContactMessage, Violation};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Connection settings for the Folio API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Result of submitting a message.
#[derive(Debug)]
pub enum SendOutcome {
  Stored(ContactMessage),
  /// The server refused the payload; one entry per offending field.
  Rejected(Vec<Violation>),
}

// ─── Response envelopes ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CreatedBody {
  message: ContactMessage,
}

#[derive(Deserialize)]
struct RejectedBody {
  details: Vec<Violation>,
}

#[derive(Deserialize)]
struct ListedBody {
  messages: Vec<ContactMessage>,
}

#[derive(Deserialize)]
struct FailureBody {
  error: String,
}

/// Async HTTP client for the Folio JSON API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  /// `POST /api/contact`
  pub async fn send(&self, input: &NewContactMessage) -> Result<SendOutcome> {
    let resp = self
      .client
      .post(self.url("/contact"))
      .json(input)
      .send()
      .await
      .context("POST /contact failed")?;

    let status = resp.status();
    let body = resp.bytes().await.context("reading POST /contact response")?;
    decode_send(status, &body)
  }

  /// `GET /api/contact`
  pub async fn inbox(&self) -> Result<Vec<ContactMessage>> {
    let resp = self
      .auth(self.client.get(self.url("/contact")))
      .send()
      .await
      .context("GET /contact failed")?;

    let status = resp.status();
    let body = resp.bytes().await.context("reading GET /contact response")?;
    decode_inbox(status, &body)
  }
}

fn decode_send(status: StatusCode, body: &[u8]) -> Result<SendOutcome> {
  match status {
    StatusCode::CREATED => {
      let created: CreatedBody =
        serde_json::from_slice(body).context("deserialising stored message")?;
      Ok(SendOutcome::Stored(created.message))
    }
    StatusCode::BAD_REQUEST => {
      let rejected: RejectedBody =
        serde_json::from_slice(body).context("deserialising validation details")?;
      Ok(SendOutcome::Rejected(rejected.details))
    }
    other => Err(failure("POST /contact", other, body)),
  }
}

fn decode_inbox(status: StatusCode, body: &[u8]) -> Result<Vec<ContactMessage>> {
  if status != StatusCode::OK {
    return Err(failure("GET /contact", status, body));
  }
  let listed: ListedBody = serde_json::from_slice(body).context("deserialising messages")?;
  Ok(listed.messages)
}

fn failure(what: &str, status: StatusCode, body: &[u8]) -> anyhow::Error {
  match serde_json::from_slice::<FailureBody>(body) {
    Ok(f) => anyhow!("{what} → {status}: {}", f.error),
    Err(_) => anyhow!("{what} → {status}"),
  }
}
