//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].
//!
//! Every query is a fixed, fully parameterized template. Optional filters are
//! expressed as `?n IS NULL OR …` guards and exclusion lists are bound through
//! `rarray()`, so no request value is ever spliced into SQL text.

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension as _, Params};

use gamerec_core::{
  game::{Game, GameId, PlayedGame},
  store::{CatalogStore, GameFilter, GenreQuery},
};

use crate::{
  Result,
  encode::{
    GAME_COLUMNS, PLAYED_COLUMNS, RawPlayedGame, encode_count, encode_dt, encode_ids,
    game_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A catalog store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        rusqlite::vtab::array::load_module(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Run a `SELECT` over [`GAME_COLUMNS`] and collect every row.
fn query_games(
  conn: &Connection,
  sql: &str,
  params: impl Params,
) -> rusqlite::Result<Vec<Game>> {
  let mut stmt = conn.prepare(sql)?;
  stmt
    .query_map(params, game_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = crate::Error;

  // ── Catalog loading ───────────────────────────────────────────────────────

  async fn add_games(&self, games: Vec<Game>) -> Result<usize> {
    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO games (
               id, title, genre, year, developer, publisher,
               platform, criticscore, userscore, poster
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          )?;
          for game in &games {
            stmt.execute(rusqlite::params![
              game.id,
              game.title,
              game.genre,
              game.year,
              game.developer,
              game.publisher,
              game.platform,
              game.criticscore,
              game.userscore,
              game.poster,
            ])?;
          }
        }
        tx.commit()?;
        Ok(games.len())
      })
      .await?;

    Ok(written)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn find_games(&self, filter: &GameFilter) -> Result<Vec<Game>> {
    let title_pattern = filter.title.as_deref().map(|t| format!("%{t}%"));
    let genre_pattern = filter.genre.as_deref().map(|g| format!("%{g}%"));
    let developer     = filter.developer.clone();
    let min_score     = filter.min_criticscore;

    let games = self
      .conn
      .call(move |conn| {
        Ok(query_games(
          conn,
          &format!(
            "SELECT {GAME_COLUMNS} FROM games
             WHERE (?1 IS NULL OR title LIKE ?1)
               AND (?2 IS NULL OR genre LIKE ?2)
               AND (?3 IS NULL OR developer = ?3)
               AND (?4 IS NULL OR criticscore >= ?4)
             ORDER BY id"
          ),
          rusqlite::params![title_pattern, genre_pattern, developer, min_score],
        )?)
      })
      .await?;

    Ok(games)
  }

  async fn games_in_genre(&self, query: &GenreQuery) -> Result<Vec<Game>> {
    let genre    = query.genre.clone();
    let excluded = query.excluded_ids.clone();
    let limit    = encode_count(query.limit);
    let offset   = encode_count(query.offset);

    let games = self
      .conn
      .call(move |conn| {
        Ok(query_games(
          conn,
          &format!(
            "SELECT {GAME_COLUMNS} FROM games
             WHERE genre = ?1
               AND id NOT IN rarray(?2)
             ORDER BY id
             LIMIT ?3 OFFSET ?4"
          ),
          rusqlite::params![genre, encode_ids(&excluded), limit, offset],
        )?)
      })
      .await?;

    Ok(games)
  }

  async fn find_by_title(&self, fragment: &str) -> Result<Option<Game>> {
    let pattern = format!("%{fragment}%");

    let game = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {GAME_COLUMNS} FROM games
                 WHERE title LIKE ?1
                 ORDER BY id
                 LIMIT 1"
              ),
              rusqlite::params![pattern],
              game_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(game)
  }

  async fn same_genre(
    &self,
    genre:         &str,
    exclude_title: &str,
    limit:         usize,
  ) -> Result<Vec<Game>> {
    let genre         = genre.to_owned();
    let exclude_title = exclude_title.to_owned();
    let limit         = encode_count(limit);

    let games = self
      .conn
      .call(move |conn| {
        Ok(query_games(
          conn,
          &format!(
            "SELECT {GAME_COLUMNS} FROM games
             WHERE genre = ?1 AND title != ?2
             ORDER BY id
             LIMIT ?3"
          ),
          rusqlite::params![genre, exclude_title, limit],
        )?)
      })
      .await?;

    Ok(games)
  }

  async fn random_games(&self, limit: usize) -> Result<Vec<Game>> {
    let limit = encode_count(limit);

    let games = self
      .conn
      .call(move |conn| {
        Ok(query_games(
          conn,
          &format!("SELECT {GAME_COLUMNS} FROM games ORDER BY RANDOM() LIMIT ?1"),
          rusqlite::params![limit],
        )?)
      })
      .await?;

    Ok(games)
  }

  // ── Play log ──────────────────────────────────────────────────────────────

  async fn record_play(&self, id: GameId) -> Result<Option<PlayedGame>> {
    let at_str = encode_dt(Utc::now());

    // The existence check and the snapshot copy are one statement, so a play
    // is never logged for a game that is not there.
    let raw: Option<RawPlayedGame> = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO played_games (game_id, title, year, genre, criticscore, played_at)
           SELECT id, title, year, genre, criticscore, ?2
           FROM games WHERE id = ?1",
          rusqlite::params![id, at_str],
        )?;
        if inserted == 0 {
          return Ok(None);
        }

        let play_id = conn.last_insert_rowid();
        Ok(Some(conn.query_row(
          &format!("SELECT {PLAYED_COLUMNS} FROM played_games WHERE play_id = ?1"),
          rusqlite::params![play_id],
          RawPlayedGame::from_row,
        )?))
      })
      .await?;

    raw.map(RawPlayedGame::into_played).transpose()
  }

  async fn played_games(&self) -> Result<Vec<PlayedGame>> {
    let raws: Vec<RawPlayedGame> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PLAYED_COLUMNS} FROM played_games ORDER BY play_id"
        ))?;
        let rows = stmt
          .query_map([], RawPlayedGame::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPlayedGame::into_played).collect()
  }
}
