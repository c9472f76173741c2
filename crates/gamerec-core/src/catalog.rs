//! The catalog operations: search, show-more paging, mark-played and
//! recommendations.
//!
//! Each operation is a thin composition of [`CatalogStore`] calls. Randomness
//! is injected by the caller so results are reproducible under test.

use rand::{Rng, seq::index};
use serde::Serialize;

use crate::{
  Error, Result,
  game::{Game, GameId, PlayedGame},
  store::{CatalogStore, GameFilter, GenreQuery, non_blank, present},
};

/// Size of every result window.
pub const PAGE_SIZE: usize = 5;

/// Running offset handed back by [`search`] for the first "show more" call.
pub const SEARCH_OFFSET: usize = PAGE_SIZE;

/// Reject a blank genre. Paging and substitution are only defined within a
/// genre, which is matched exactly as given.
pub fn require_genre(genre: &str) -> Result<String> {
  present(Some(genre)).ok_or(Error::EmptyGenre)
}

/// Pick up to `amount` distinct items uniformly at random.
pub fn sample<T, R>(items: Vec<T>, amount: usize, rng: &mut R) -> Vec<T>
where
  R: Rng + ?Sized,
{
  let amount = amount.min(items.len());
  let picked = index::sample(rng, items.len(), amount);
  let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
  picked.into_iter().filter_map(|i| slots[i].take()).collect()
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// Result of [`search`]: the sampled games plus the paging state needed to
/// ask for more.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
  pub games:        Vec<Game>,
  /// The genre filter as submitted; `None` means paging is unavailable.
  pub genre:        Option<String>,
  pub offset:       usize,
  pub excluded_ids: Vec<GameId>,
}

/// Run `filter` and return a random sample of at most [`PAGE_SIZE`] matches.
pub async fn search<S, R>(
  store: &S,
  filter: &GameFilter,
  rng: &mut R,
) -> Result<SearchResults, S::Error>
where
  S: CatalogStore,
  R: Rng + Send,
{
  let matches = store.find_games(filter).await?;
  let games = sample(matches, PAGE_SIZE, rng);
  let excluded_ids = games.iter().map(|g| g.id).collect();

  Ok(SearchResults {
    games,
    genre: filter.genre.clone(),
    offset: SEARCH_OFFSET,
    excluded_ids,
  })
}

// ─── Show more ───────────────────────────────────────────────────────────────

/// The next window of up to [`PAGE_SIZE`] games in `genre`.
pub async fn show_more<S>(
  store: &S,
  genre: String,
  offset: usize,
  excluded_ids: Vec<GameId>,
) -> Result<Vec<Game>, S::Error>
where
  S: CatalogStore,
{
  let query = GenreQuery { genre, excluded_ids, offset, limit: PAGE_SIZE };
  store.games_in_genre(&query).await
}

// ─── Mark played ─────────────────────────────────────────────────────────────

/// Outcome of [`mark_played`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
  /// No game has the requested id; the play log is untouched.
  NotFound,
  /// The play was logged and a substitute from the same genre is available.
  Next { played: PlayedGame, next: Game },
  /// The play was logged but every game in the genre is excluded.
  Exhausted { played: PlayedGame },
}

/// Log a play of `game_id`, then pick one substitute game from `genre` that is
/// neither `game_id` nor in `excluded_ids`.
pub async fn mark_played<S>(
  store: &S,
  game_id: GameId,
  genre: String,
  mut excluded_ids: Vec<GameId>,
) -> Result<PlayOutcome, S::Error>
where
  S: CatalogStore,
{
  let Some(played) = store.record_play(game_id).await? else {
    return Ok(PlayOutcome::NotFound);
  };

  excluded_ids.push(game_id);
  let query = GenreQuery { genre, excluded_ids, offset: 0, limit: 1 };
  let next = store.games_in_genre(&query).await?.into_iter().next();

  Ok(match next {
    Some(next) => PlayOutcome::Next { played, next },
    None => PlayOutcome::Exhausted { played },
  })
}

// ─── Recommend ───────────────────────────────────────────────────────────────

/// Games similar to the first title containing `title`, or a random handful
/// when no title is given.
pub async fn recommend<S>(store: &S, title: Option<&str>) -> Result<Vec<Game>, S::Error>
where
  S: CatalogStore,
{
  let Some(title) = non_blank(title) else {
    return store.random_games(PAGE_SIZE).await;
  };

  match store.find_by_title(&title).await? {
    Some(anchor) => {
      store
        .same_genre(&anchor.genre, &anchor.title, PAGE_SIZE)
        .await
    }
    None => Ok(Vec::new()),
  }
}
