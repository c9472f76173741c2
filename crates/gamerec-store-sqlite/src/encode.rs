//! Row decoding and column encoding between SQLite and the domain types.
//!
//! Timestamps are stored as RFC 3339 strings. Exclusion lists are bound as a
//! single `rarray()` parameter.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use gamerec_core::game::{Game, GameId, PlayedGame};
use rusqlite::{Row, types::Value};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Id lists ────────────────────────────────────────────────────────────────

/// Bind a list of ids as one parameter for `IN rarray(?n)`.
///
/// Built inside the connection closure: `Rc` never crosses threads.
pub fn encode_ids(ids: &[GameId]) -> Rc<Vec<Value>> {
  Rc::new(ids.iter().copied().map(Value::from).collect())
}

// ─── Counts ──────────────────────────────────────────────────────────────────

/// Bind a `LIMIT` or `OFFSET` value. Anything past `i64::MAX` saturates; a
/// wrapped negative would make SQLite ignore the clause.
pub fn encode_count(n: usize) -> i64 { i64::try_from(n).unwrap_or(i64::MAX) }

// ─── Games ───────────────────────────────────────────────────────────────────

/// Column list matching [`game_from_row`].
pub const GAME_COLUMNS: &str = "id, title, genre, year, developer, publisher, \
                                platform, criticscore, userscore, poster";

pub fn game_from_row(row: &Row<'_>) -> rusqlite::Result<Game> {
  Ok(Game {
    id:          row.get(0)?,
    title:       row.get(1)?,
    genre:       row.get(2)?,
    year:        row.get(3)?,
    developer:   row.get(4)?,
    publisher:   row.get(5)?,
    platform:    row.get(6)?,
    criticscore: row.get(7)?,
    userscore:   row.get(8)?,
    poster:      row.get(9)?,
  })
}

// ─── Play log ────────────────────────────────────────────────────────────────

/// Column list matching [`RawPlayedGame::from_row`].
pub const PLAYED_COLUMNS: &str =
  "play_id, game_id, title, year, genre, criticscore, played_at";

/// A `played_games` row before its timestamp is parsed.
pub struct RawPlayedGame {
  pub play_id:     i64,
  pub game_id:     GameId,
  pub title:       String,
  pub year:        Option<i64>,
  pub genre:       String,
  pub criticscore: Option<f64>,
  pub played_at:   String,
}

impl RawPlayedGame {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      play_id:     row.get(0)?,
      game_id:     row.get(1)?,
      title:       row.get(2)?,
      year:        row.get(3)?,
      genre:       row.get(4)?,
      criticscore: row.get(5)?,
      played_at:   row.get(6)?,
    })
  }

  pub fn into_played(self) -> Result<PlayedGame> {
    Ok(PlayedGame {
      play_id:     self.play_id,
      game_id:     self.game_id,
      title:       self.title,
      year:        self.year,
      genre:       self.genre,
      criticscore: self.criticscore,
      played_at:   decode_dt(&self.played_at)?,
    })
  }
}
