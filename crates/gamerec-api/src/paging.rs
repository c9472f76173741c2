//! Handler for `POST /show_more`.
//!
//! Body: `{"genre": "RPG", "offset": 5, "excluded_ids": [1, 2]}`. All three
//! fields are required and `genre` must be non-empty.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use gamerec_core::{
  catalog::{self, require_genre},
  game::{Game, GameId},
  store::CatalogStore,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ShowMoreBody {
  pub genre:        String,
  /// Rows of the genre to skip after exclusions are applied.
  pub offset:       usize,
  pub excluded_ids: Vec<GameId>,
}

#[derive(Debug, Serialize)]
pub struct ShowMoreResponse {
  pub recommendations: Vec<Game>,
}

/// `POST /show_more`
pub async fn show_more<S>(
  State(store): State<Arc<S>>,
  payload: Result<Json<ShowMoreBody>, JsonRejection>,
) -> Result<Json<ShowMoreResponse>, ApiError>
where
  S: CatalogStore,
{
  let Json(body) = payload?;
  let genre = require_genre(&body.genre)?;

  let recommendations =
    catalog::show_more(store.as_ref(), genre, body.offset, body.excluded_ids)
      .await
      .map_err(ApiError::store)?;

  tracing::debug!(count = recommendations.len(), "show_more");
  Ok(Json(ShowMoreResponse { recommendations }))
}
