//! Catalog records and play-log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a row in the `games` table.
pub type GameId = i64;

/// A single catalog entry. Reference data: loaded once, never mutated by the
/// service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
  pub id:          GameId,
  pub title:       String,
  pub genre:       String,
  #[serde(default)]
  pub year:        Option<i64>,
  #[serde(default)]
  pub developer:   Option<String>,
  #[serde(default)]
  pub publisher:   Option<String>,
  #[serde(default)]
  pub platform:    Option<String>,
  #[serde(default)]
  pub criticscore: Option<f64>,
  #[serde(default)]
  pub userscore:   Option<f64>,
  #[serde(default)]
  pub poster:      Option<String>,
}

/// A row of the append-only play log.
///
/// `title`, `year`, `genre` and `criticscore` are a snapshot of the game taken
/// when the play was recorded; they are never refreshed from `games`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayedGame {
  pub play_id:     i64,
  pub game_id:     GameId,
  pub title:       String,
  pub year:        Option<i64>,
  pub genre:       String,
  pub criticscore: Option<f64>,
  pub played_at:   DateTime<Utc>,
}
