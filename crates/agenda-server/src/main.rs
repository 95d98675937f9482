//! agenda-server binary.
//!
//! Reads `agenda.toml` (or the path given with `--config`) plus `AGENDA_*`
//! environment variables, opens the SQLite store, and serves the contact and
//! hobby API over HTTP.
//!
//! ```text
//! AGENDA_DATABASE_URL=./agenda.db AGENDA_API_KEY=... cargo run -p agenda-server
//! ```

mod settings;

use std::{path::PathBuf, sync::Arc};

use agenda_api::{AppState, validator::NinjasValidator};
use agenda_store_sqlite::SqliteStore;
use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Agenda contacts and hobbies API")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "agenda.toml")]
  config: PathBuf,

  /// Override the listening port.
  #[arg(short, long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut server_cfg = ServerConfig::load(&cli.config)?;
  if let Some(port) = cli.port {
    server_cfg.port = port;
  }

  let store_path = server_cfg.store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(path = ?store_path, "store opened");

  if server_cfg.api_key.is_none() {
    tracing::warn!("no api_key configured; contact reads will fail");
  }
  let validator = NinjasValidator::new(server_cfg.validator_url.clone(), server_cfg.api_key.clone())
    .context("failed to build phone-validation client")?;

  let state = AppState {
    store:     Arc::new(store),
    validator: Arc::new(validator),
  };

  let app = agenda_api::api_router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
