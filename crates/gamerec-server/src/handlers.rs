//! Handlers for the HTML pages.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Landing page |
//! | `GET`  | `/search` | Empty search form |
//! | `POST` | `/search` | Form: `title`, `genre`, `developer`, `criticscore`; all optional |
//! | `GET`  | `/recommendations` | Empty recommendation form |
//! | `POST` | `/recommendations` | Form: optional `title` |

use std::sync::Arc;

use axum::{
  Form,
  extract::{State, rejection::FormRejection},
  response::Html,
};
use gamerec_api::ApiError;
use gamerec_core::{
  catalog,
  store::{CatalogStore, GameFilter},
};
use rand::{SeedableRng, rngs::StdRng};
use serde::Deserialize;

use crate::html::{self, SearchEcho};

/// `GET /`
pub async fn index() -> Html<String> { Html(html::index_page()) }

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
  pub title:       Option<String>,
  pub genre:       Option<String>,
  pub developer:   Option<String>,
  pub criticscore: Option<String>,
}

/// `GET /search`
pub async fn search_form() -> Html<String> {
  Html(html::search_page(&SearchEcho::default(), None))
}

/// `POST /search` — 400 if `criticscore` is not a number.
pub async fn search<S>(
  State(store): State<Arc<S>>,
  payload: Result<Form<SearchForm>, FormRejection>,
) -> Result<Html<String>, ApiError>
where
  S: CatalogStore,
{
  let Form(form) = payload?;
  let filter = GameFilter::from_form(
    form.title.as_deref(),
    form.genre.as_deref(),
    form.developer.as_deref(),
    form.criticscore.as_deref(),
  )?;

  let mut rng = StdRng::from_entropy();
  let results = catalog::search(store.as_ref(), &filter, &mut rng)
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(count = results.games.len(), ?filter, "search");

  let echo = SearchEcho {
    title:       form.title.as_deref(),
    genre:       form.genre.as_deref(),
    developer:   form.developer.as_deref(),
    criticscore: form.criticscore.as_deref(),
  };
  Ok(Html(html::search_page(&echo, Some(&results))))
}

// ─── Recommendations ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct RecommendForm {
  pub title: Option<String>,
}

/// `GET /recommendations`
pub async fn recommendations_form() -> Html<String> {
  Html(html::recommendations_page(None, None))
}

/// `POST /recommendations` — a blank title means "surprise me".
pub async fn recommendations<S>(
  State(store): State<Arc<S>>,
  payload: Result<Form<RecommendForm>, FormRejection>,
) -> Result<Html<String>, ApiError>
where
  S: CatalogStore,
{
  let Form(form) = payload?;
  let title = form.title.as_deref();

  let games = catalog::recommend(store.as_ref(), title)
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(count = games.len(), ?title, "recommendations");

  Ok(Html(html::recommendations_page(title, Some(games.as_slice()))))
}
