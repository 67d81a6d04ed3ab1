//! `folio` — command-line client for the Folio contact inbox.
//!
//! # Usage
//!
//! ```
//! folio send --name Alice --email alice@example.com --message "Loved the site!"
//! folio --user owner --password secret inbox
//! folio --config ~/.config/folio/config.toml inbox
//! ```

mod client;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig, SendOutcome};
use folio_core::NewContactMessage;
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Send to and read the Folio contact inbox")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the folio server (default: http://localhost:3000).
  #[arg(long, env = "FOLIO_URL")]
  url: Option<String>,

  /// Username for the inbox read gate, if the server has one.
  #[arg(long, env = "FOLIO_USER")]
  user: Option<String>,

  /// Password for the inbox read gate (plaintext).
  #[arg(long, env = "FOLIO_PASSWORD")]
  password: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Submit a contact message.
  Send {
    #[arg(long)]
    name:    String,
    #[arg(long)]
    email:   String,
    #[arg(long)]
    message: String,
  },
  /// Print every stored message, oldest first.
  Inbox,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

fn non_empty(s: &str) -> Option<String> { (!s.is_empty()).then(|| s.to_string()) }

/// Render a stored timestamp in the reader's time zone.
fn format_received<Tz: TimeZone>(at: DateTime<Utc>, zone: &Tz) -> String
where
  Tz::Offset: std::fmt::Display,
{
  at.with_timezone(zone).format("%Y-%m-%d %H:%M %Z").to_string()
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| non_empty(&file_cfg.url))
      .unwrap_or_else(|| "http://localhost:3000".to_string()),
    username: args
      .user
      .or_else(|| non_empty(&file_cfg.username))
      .unwrap_or_default(),
    password: args
      .password
      .or_else(|| non_empty(&file_cfg.password))
      .unwrap_or_default(),
  };

  let client = ApiClient::new(api_config)?;

  match args.command {
    Command::Send { name, email, message } => {
      let input = NewContactMessage { name, email, message };
      match client.send(&input).await? {
        SendOutcome::Stored(stored) => println!("sent {}", stored.id),
        SendOutcome::Rejected(violations) => {
          for v in &violations {
            eprintln!("{}: {}", v.field, v.message);
          }
          bail!("message rejected ({} problem(s))", violations.len());
        }
      }
    }
    Command::Inbox => {
      let messages = client.inbox().await?;
      if messages.is_empty() {
        println!("inbox is empty");
      }
      for m in messages {
        println!(
          "{}  {} <{}>\n    {}\n",
          format_received(m.created_at, &Local),
          m.name,
          m.email,
          m.message.replace('\n', "\n    "),
        );
      }
    }
  }

  Ok(())
}
