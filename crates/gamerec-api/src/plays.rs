//! Handlers for the play log.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/mark_played` | Body: [`MarkPlayedBody`]; returns the next game of the genre |
//! | `GET`  | `/played` | The whole log, oldest first |

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use gamerec_core::{
  catalog::{self, PlayOutcome, require_genre},
  game::{Game, GameId, PlayedGame},
  store::CatalogStore,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const GAME_NOT_FOUND: &str = "Game not found";
pub const NO_MORE_GAMES: &str = "No more games available";

// ─── Mark played ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MarkPlayedBody {
  pub game_id:      GameId,
  pub genre:        String,
  /// Accepted for symmetry with `/show_more`; the substitute is always the
  /// first eligible game.
  pub offset:       usize,
  pub excluded_ids: Vec<GameId>,
}

/// Either the substitute game itself or a message saying there is none.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MarkPlayedResponse {
  Next(Game),
  Exhausted { message: &'static str },
}

/// `POST /mark_played` — 404 `{"message":"Game not found"}` for unknown ids.
pub async fn mark_played<S>(
  State(store): State<Arc<S>>,
  payload: Result<Json<MarkPlayedBody>, JsonRejection>,
) -> Result<Json<MarkPlayedResponse>, ApiError>
where
  S: CatalogStore,
{
  let Json(body) = payload?;
  let genre = require_genre(&body.genre)?;

  let outcome =
    catalog::mark_played(store.as_ref(), body.game_id, genre, body.excluded_ids)
      .await
      .map_err(ApiError::store)?;

  let response = match outcome {
    PlayOutcome::NotFound => {
      return Err(ApiError::NotFound(GAME_NOT_FOUND.to_owned()));
    }
    PlayOutcome::Next { played, next } => {
      tracing::info!(game_id = played.game_id, next_id = next.id, "marked played");
      MarkPlayedResponse::Next(next)
    }
    PlayOutcome::Exhausted { played } => {
      tracing::info!(game_id = played.game_id, "marked played; genre exhausted");
      MarkPlayedResponse::Exhausted { message: NO_MORE_GAMES }
    }
  };
  Ok(Json(response))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PlayedResponse {
  pub played: Vec<PlayedGame>,
}

/// `GET /played`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<PlayedResponse>, ApiError>
where
  S: CatalogStore,
{
  let played = store.played_games().await.map_err(ApiError::store)?;
  Ok(Json(PlayedResponse { played }))
}
