//! The `CatalogStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `gamerec-store-sqlite`).
//! The HTTP crates depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  Error, Result,
  game::{Game, GameId, PlayedGame},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Conjunctive filter for [`CatalogStore::find_games`].
///
/// A `None` field places no constraint on its column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFilter {
  /// Substring of the title (`LIKE '%…%'`).
  pub title:           Option<String>,
  /// Substring of the genre (`LIKE '%…%'`).
  pub genre:           Option<String>,
  /// Exact developer name.
  pub developer:       Option<String>,
  /// Inclusive lower bound on `criticscore`.
  pub min_criticscore: Option<f64>,
}

impl GameFilter {
  /// Build a filter from raw form values. Blank values are treated as absent;
  /// anything else is kept exactly as submitted.
  pub fn from_form(
    title: Option<&str>,
    genre: Option<&str>,
    developer: Option<&str>,
    criticscore: Option<&str>,
  ) -> Result<Self> {
    let min_criticscore = match non_blank(criticscore) {
      None => None,
      Some(raw) => {
        let score = raw
          .parse::<f64>()
          .map_err(|_| Error::InvalidCriticScore(raw.clone()))?;
        if score.is_nan() {
          return Err(Error::InvalidCriticScore(raw));
        }
        Some(score)
      }
    };

    Ok(Self {
      title: present(title),
      genre: present(genre),
      developer: present(developer),
      min_criticscore,
    })
  }
}

/// Trim `value`, returning `None` when nothing is left.
pub fn non_blank(value: Option<&str>) -> Option<String> {
  value
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_owned)
}

/// `value` untouched, or `None` when it is only whitespace.
pub fn present(value: Option<&str>) -> Option<String> {
  value
    .filter(|v| !v.trim().is_empty())
    .map(str::to_owned)
}

/// A window over the games of one exact genre, minus an exclusion set.
///
/// Rows are ordered by `id` ascending before `offset` and `limit` apply.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreQuery {
  pub genre:        String,
  pub excluded_ids: Vec<GameId>,
  pub offset:       usize,
  pub limit:        usize,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a catalog store backend.
///
/// The catalog itself is read-only reference data; the only write on the
/// request path is [`record_play`](Self::record_play), which appends to the
/// play log.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Catalog loading ───────────────────────────────────────────────────

  /// Insert or replace catalog rows by id. Returns the number written.
  fn add_games(
    &self,
    games: Vec<Game>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every game matching `filter`, in id order.
  fn find_games<'a>(
    &'a self,
    filter: &'a GameFilter,
  ) -> impl Future<Output = Result<Vec<Game>, Self::Error>> + Send + 'a;

  /// Games whose genre equals `query.genre` exactly, skipping excluded ids.
  fn games_in_genre<'a>(
    &'a self,
    query: &'a GenreQuery,
  ) -> impl Future<Output = Result<Vec<Game>, Self::Error>> + Send + 'a;

  /// The lowest-id game whose title contains `fragment`.
  fn find_by_title<'a>(
    &'a self,
    fragment: &'a str,
  ) -> impl Future<Output = Result<Option<Game>, Self::Error>> + Send + 'a;

  /// Up to `limit` games of `genre` whose title is not exactly
  /// `exclude_title`, in id order.
  fn same_genre<'a>(
    &'a self,
    genre: &'a str,
    exclude_title: &'a str,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Game>, Self::Error>> + Send + 'a;

  /// Up to `limit` distinct games drawn uniformly from the whole catalog.
  fn random_games(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Game>, Self::Error>> + Send + '_;

  // ── Play log ──────────────────────────────────────────────────────────

  /// Append a snapshot of game `id` to the play log.
  ///
  /// Returns `None` (and writes nothing) if the game does not exist. Not
  /// idempotent: each call for an existing game appends a new row.
  fn record_play(
    &self,
    id: GameId,
  ) -> impl Future<Output = Result<Option<PlayedGame>, Self::Error>> + Send + '_;

  /// The whole play log, oldest first.
  fn played_games(
    &self,
  ) -> impl Future<Output = Result<Vec<PlayedGame>, Self::Error>> + Send + '_;
}
