//! folio-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! configured message store, and serves the contact API over HTTP.
//!
//! `--hash-password` prints the argon2 PHC string for `read_password_hash`
//! and exits without starting the server.

use std::{io, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use folio_server::ServerConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Folio contact inbox server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Hash the first line of stdin for use as `read_password_hash`, then exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.hash_password {
    let line = io::stdin()
      .lines()
      .next()
      .transpose()
      .context("reading password from stdin")?
      .unwrap_or_default();
    println!("{}", folio_server::hash_password(&line)?);
    return Ok(());
  }

  let config = ServerConfig::load(&cli.config).context("failed to load configuration")?;
  folio_server::run(config).await
}
