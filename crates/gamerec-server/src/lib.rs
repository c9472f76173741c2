//! HTTP front end for the game catalog.
//!
//! Serves the HTML pages and merges in the JSON router from `gamerec-api`,
//! all backed by any [`CatalogStore`].

pub mod handlers;
pub mod html;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use gamerec_core::store::CatalogStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `GAMEREC_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// SQLite database file; created on first start.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 5000 }

fn default_store_path() -> PathBuf { PathBuf::from("games.db") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       default_host(),
      port:       default_port(),
      store_path: default_store_path(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: pages, JSON endpoints and request
/// tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: CatalogStore + 'static,
{
  Router::new()
    .route("/", get(handlers::index))
    .route(
      "/search",
      get(handlers::search_form).post(handlers::search::<S>),
    )
    .route(
      "/recommendations",
      get(handlers::recommendations_form).post(handlers::recommendations::<S>),
    )
    .with_state(store.clone())
    .merge(gamerec_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}
