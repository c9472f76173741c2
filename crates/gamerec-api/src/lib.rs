//! JSON endpoints for the game catalog.
//!
//! Exposes an axum [`Router`] backed by any [`gamerec_core::store::CatalogStore`].
//! The HTML pages live in `gamerec-server`, which merges this router at the
//! root.

pub mod error;
pub mod paging;
pub mod plays;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use gamerec_core::store::CatalogStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  Router::new()
    .route("/show_more", post(paging::show_more::<S>))
    .route("/mark_played", post(plays::mark_played::<S>))
    .route("/played", get(plays::list::<S>))
    .with_state(store)
}
