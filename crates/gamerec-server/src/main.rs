//! gamerec-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite catalog, and serves the pages and JSON endpoints over HTTP.
//!
//! # Loading a catalog
//!
//! The catalog is a JSON array of game objects
//! (`{"id":1,"title":"…","genre":"…",…}`):
//!
//! ```
//! cargo run -p gamerec-server -- --import games.json
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use gamerec_core::{game::Game, store::CatalogStore};
use gamerec_server::ServerConfig;
use gamerec_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Game catalog search and recommendation server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load games from a JSON file into the store and exit.
  #[arg(long, value_name = "FILE")]
  import: Option<PathBuf>,
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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("GAMEREC"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Helper mode: load a catalog and exit.
  if let Some(path) = cli.import {
    let count = import_catalog(&store, &path).await?;
    tracing::info!("Imported {count} games from {path:?} into {store_path:?}");
    return Ok(());
  }

  let app = gamerec_server::router(Arc::new(store));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Parse a JSON array of games and upsert them.
async fn import_catalog(store: &SqliteStore, path: &Path) -> anyhow::Result<usize> {
  let raw = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read {path:?}"))?;
  let games: Vec<Game> = serde_json::from_str(&raw)
    .with_context(|| format!("{path:?} is not a JSON array of games"))?;

  store
    .add_games(games)
    .await
    .context("failed to write games")
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
