//! Integration tests for `SqliteStore` and the catalog operations against an
//! in-memory database.

use std::collections::HashSet;

use gamerec_core::{
  catalog::{self, PAGE_SIZE, PlayOutcome, SEARCH_OFFSET},
  game::Game,
  store::{CatalogStore, GameFilter, GenreQuery},
};
use rand::{SeedableRng, rngs::StdRng};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn game(id: i64, title: &str, genre: &str) -> Game {
  Game {
    id,
    title: title.into(),
    genre: genre.into(),
    year: Some(2000 + id),
    developer: Some("Studio".into()),
    publisher: Some("Publisher".into()),
    platform: Some("PC".into()),
    criticscore: Some(7.0),
    userscore: Some(6.5),
    poster: Some(format!("https://img.example/{id}.jpg")),
  }
}

async fn seeded(games: Vec<Game>) -> SqliteStore {
  let s = store().await;
  s.add_games(games).await.unwrap();
  s
}

fn ids(games: &[Game]) -> Vec<i64> { games.iter().map(|g| g.id).collect() }

fn rng() -> StdRng { StdRng::seed_from_u64(42) }

// ─── Catalog loading ─────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_read_back_game() {
  let s = store().await;
  let written = s
    .add_games(vec![game(1, "Chrono Trigger", "RPG")])
    .await
    .unwrap();
  assert_eq!(written, 1);

  let all = s.find_games(&GameFilter::default()).await.unwrap();
  assert_eq!(all, vec![game(1, "Chrono Trigger", "RPG")]);
}

#[tokio::test]
async fn empty_store_has_no_games() {
  let s = store().await;
  assert!(s.find_games(&GameFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn add_games_replaces_by_id() {
  let s = seeded(vec![game(1, "Old Title", "RPG")]).await;
  s.add_games(vec![game(1, "New Title", "RPG")]).await.unwrap();

  let all = s.find_games(&GameFilter::default()).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].title, "New Title");
}

#[tokio::test]
async fn nullable_columns_roundtrip_as_none() {
  let bare = Game {
    id: 5,
    title: "Bare".into(),
    genre: "Puzzle".into(),
    year: None,
    developer: None,
    publisher: None,
    platform: None,
    criticscore: None,
    userscore: None,
    poster: None,
  };
  let s = seeded(vec![bare.clone()]).await;
  assert_eq!(s.find_games(&GameFilter::default()).await.unwrap(), vec![bare]);
}

// ─── Filtering ───────────────────────────────────────────────────────────────

fn filter_catalog() -> Vec<Game> {
  let mut zelda = game(1, "The Legend of Zelda", "Action-Adventure");
  zelda.developer = Some("Nintendo".into());
  zelda.criticscore = Some(9.5);

  let mut oot = game(2, "Zelda: Ocarina of Time", "Action-Adventure");
  oot.developer = Some("Nintendo".into());
  oot.criticscore = Some(9.9);

  let mut doom = game(3, "Doom", "Shooter");
  doom.developer = Some("id Software".into());
  doom.criticscore = Some(8.0);

  let mut quake = game(4, "Quake", "Shooter");
  quake.developer = Some("id Software".into());
  quake.criticscore = None;

  vec![zelda, oot, doom, quake]
}

#[tokio::test]
async fn empty_filter_matches_everything() {
  let s = seeded(filter_catalog()).await;
  let all = s.find_games(&GameFilter::default()).await.unwrap();
  assert_eq!(ids(&all), [1, 2, 3, 4]);
}

#[tokio::test]
async fn title_and_genre_are_substring_matches() {
  let s = seeded(filter_catalog()).await;

  let by_title = s
    .find_games(&GameFilter { title: Some("Zelda".into()), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(ids(&by_title), [1, 2]);

  let by_genre = s
    .find_games(&GameFilter { genre: Some("Adventure".into()), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(ids(&by_genre), [1, 2]);
}

#[tokio::test]
async fn developer_is_an_exact_match() {
  let s = seeded(filter_catalog()).await;

  let exact = s
    .find_games(&GameFilter { developer: Some("id Software".into()), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(ids(&exact), [3, 4]);

  let partial = s
    .find_games(&GameFilter { developer: Some("id".into()), ..Default::default() })
    .await
    .unwrap();
  assert!(partial.is_empty());
}

#[tokio::test]
async fn criticscore_bound_is_inclusive_and_skips_unscored() {
  let s = seeded(filter_catalog()).await;
  let found = s
    .find_games(&GameFilter { min_criticscore: Some(8.0), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(ids(&found), [1, 2, 3]);
}

#[tokio::test]
async fn filters_are_conjunctive() {
  let s = seeded(filter_catalog()).await;
  let found = s
    .find_games(&GameFilter {
      title:           Some("Zelda".into()),
      developer:       Some("Nintendo".into()),
      min_criticscore: Some(9.7),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(ids(&found), [2]);
}

#[tokio::test]
async fn filter_values_are_bound_not_spliced() {
  let s = seeded(filter_catalog()).await;
  let found = s
    .find_games(&GameFilter {
      developer: Some("x' OR '1'='1".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(found.is_empty());
  assert_eq!(s.find_games(&GameFilter::default()).await.unwrap().len(), 4);
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_example_returns_only_matching_genre() {
  let s = seeded(vec![
    game(1, "A", "RPG"),
    game(2, "B", "RPG"),
    game(3, "C", "FPS"),
  ])
  .await;

  let filter = GameFilter { genre: Some("RPG".into()), ..Default::default() };
  let results = catalog::search(&s, &filter, &mut rng()).await.unwrap();

  let mut found = ids(&results.games);
  found.sort();
  assert_eq!(found, [1, 2]);
  assert_eq!(results.genre.as_deref(), Some("RPG"));
  assert_eq!(results.offset, SEARCH_OFFSET);

  let mut excluded = results.excluded_ids.clone();
  excluded.sort();
  assert_eq!(excluded, [1, 2]);
}

#[tokio::test]
async fn search_samples_at_most_a_page_without_duplicates() {
  let s = seeded((1..=20).map(|i| game(i, &format!("Game {i}"), "RPG")).collect()).await;

  let results = catalog::search(&s, &GameFilter::default(), &mut rng())
    .await
    .unwrap();
  assert_eq!(results.games.len(), PAGE_SIZE);
  let unique: HashSet<_> = results.excluded_ids.iter().collect();
  assert_eq!(unique.len(), PAGE_SIZE);
  assert_eq!(results.excluded_ids, ids(&results.games));
}

#[tokio::test]
async fn search_with_no_matches_is_empty_not_an_error() {
  let s = seeded(filter_catalog()).await;
  let filter = GameFilter { title: Some("Metroid".into()), ..Default::default() };
  let results = catalog::search(&s, &filter, &mut rng()).await.unwrap();
  assert!(results.games.is_empty());
  assert!(results.excluded_ids.is_empty());
}

// ─── Show more ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn show_more_example_skips_excluded() {
  let s = seeded(vec![
    game(1, "A", "RPG"),
    game(2, "B", "RPG"),
    game(3, "C", "FPS"),
  ])
  .await;

  let more = catalog::show_more(&s, "RPG".into(), 0, vec![1]).await.unwrap();
  assert_eq!(ids(&more), [2]);
}

#[tokio::test]
async fn show_more_pages_in_id_order_with_offset() {
  let s = seeded((1..=12).map(|i| game(i, &format!("Game {i}"), "RPG")).collect()).await;

  let first = catalog::show_more(&s, "RPG".into(), 0, vec![2, 4]).await.unwrap();
  assert_eq!(ids(&first), [1, 3, 5, 6, 7]);

  let second = catalog::show_more(&s, "RPG".into(), 5, vec![2, 4]).await.unwrap();
  assert_eq!(ids(&second), [8, 9, 10, 11, 12]);

  let beyond = catalog::show_more(&s, "RPG".into(), 10, vec![2, 4]).await.unwrap();
  assert!(beyond.is_empty());
}

#[tokio::test]
async fn show_more_offset_beyond_i64_is_empty() {
  let s = seeded(vec![
    game(1, "A", "RPG"),
    game(2, "B", "RPG"),
    game(3, "C", "RPG"),
  ])
  .await;

  for offset in [1usize << 63, usize::MAX] {
    let more = catalog::show_more(&s, "RPG".into(), offset, vec![]).await.unwrap();
    assert!(more.is_empty(), "offset {offset} returned {:?}", ids(&more));
  }
}

#[tokio::test]
async fn show_more_requires_exact_genre() {
  let s = seeded(vec![game(1, "A", "Action RPG"), game(2, "B", "RPG")]).await;
  let more = catalog::show_more(&s, "RPG".into(), 0, vec![]).await.unwrap();
  assert_eq!(ids(&more), [2]);
}

#[tokio::test]
async fn games_in_genre_respects_limit() {
  let s = seeded((1..=8).map(|i| game(i, &format!("Game {i}"), "RPG")).collect()).await;
  let query = GenreQuery {
    genre:        "RPG".into(),
    excluded_ids: vec![1],
    offset:       0,
    limit:        1,
  };
  assert_eq!(ids(&s.games_in_genre(&query).await.unwrap()), [2]);
}

// ─── Mark played ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn mark_played_logs_snapshot_and_suggests_next() {
  let s = seeded(vec![
    game(1, "A", "RPG"),
    game(2, "B", "RPG"),
    game(3, "C", "RPG"),
  ])
  .await;

  let outcome = catalog::mark_played(&s, 1, "RPG".into(), vec![2]).await.unwrap();
  let PlayOutcome::Next { played, next } = outcome else {
    panic!("expected a substitute, got {outcome:?}");
  };
  assert_eq!(next.id, 3);

  let source = game(1, "A", "RPG");
  assert_eq!(played.game_id, source.id);
  assert_eq!(played.title, source.title);
  assert_eq!(played.year, source.year);
  assert_eq!(played.genre, source.genre);
  assert_eq!(played.criticscore, source.criticscore);

  let log = s.played_games().await.unwrap();
  assert_eq!(log, vec![played]);
}

#[tokio::test]
async fn mark_played_twice_appends_two_rows() {
  let s = seeded(vec![game(1, "A", "RPG"), game(2, "B", "RPG")]).await;

  catalog::mark_played(&s, 1, "RPG".into(), vec![]).await.unwrap();
  catalog::mark_played(&s, 1, "RPG".into(), vec![]).await.unwrap();

  let log = s.played_games().await.unwrap();
  assert_eq!(log.len(), 2);
  assert!(log.iter().all(|p| p.game_id == 1));
  assert_ne!(log[0].play_id, log[1].play_id);
}

#[tokio::test]
async fn mark_played_unknown_game_writes_nothing() {
  let s = seeded(vec![game(1, "A", "RPG")]).await;

  let outcome = catalog::mark_played(&s, 404, "RPG".into(), vec![]).await.unwrap();
  assert_eq!(outcome, PlayOutcome::NotFound);
  assert!(s.played_games().await.unwrap().is_empty());
}

#[tokio::test]
async fn mark_played_exhausted_genre_still_logs() {
  let s = seeded(vec![game(1, "A", "RPG"), game(2, "B", "RPG")]).await;

  let outcome = catalog::mark_played(&s, 1, "RPG".into(), vec![2]).await.unwrap();
  assert!(matches!(outcome, PlayOutcome::Exhausted { ref played } if played.game_id == 1));
  assert_eq!(s.played_games().await.unwrap().len(), 1);
}

#[tokio::test]
async fn play_log_snapshot_survives_catalog_changes() {
  let s = seeded(vec![game(1, "Original", "RPG")]).await;
  s.record_play(1).await.unwrap().unwrap();
  s.add_games(vec![game(1, "Remastered", "RPG")]).await.unwrap();

  let log = s.played_games().await.unwrap();
  assert_eq!(log[0].title, "Original");
}

// ─── Recommend ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn recommend_by_title_stays_in_genre_and_skips_match() {
  let mut catalog_games = vec![
    game(1, "The Legend of Zelda", "Adventure"),
    game(2, "Shooter One", "Shooter"),
  ];
  catalog_games.extend((3..=10).map(|i| game(i, &format!("Quest {i}"), "Adventure")));
  let s = seeded(catalog_games).await;

  let recs = catalog::recommend(&s, Some("Zelda")).await.unwrap();
  assert_eq!(recs.len(), PAGE_SIZE);
  assert!(recs.iter().all(|g| g.genre == "Adventure"));
  assert!(recs.iter().all(|g| g.title != "The Legend of Zelda"));
  assert_eq!(ids(&recs), [3, 4, 5, 6, 7]);
}

#[tokio::test]
async fn recommend_unknown_title_is_empty() {
  let s = seeded(filter_catalog()).await;
  let recs = catalog::recommend(&s, Some("Metroid")).await.unwrap();
  assert!(recs.is_empty());
}

#[tokio::test]
async fn recommend_without_title_returns_five_distinct_games() {
  let s = seeded((1..=12).map(|i| game(i, &format!("Game {i}"), "RPG")).collect()).await;

  for title in [None, Some(""), Some("   ")] {
    let recs = catalog::recommend(&s, title).await.unwrap();
    assert_eq!(recs.len(), PAGE_SIZE);
    let unique: HashSet<_> = recs.iter().map(|g| g.id).collect();
    assert_eq!(unique.len(), PAGE_SIZE);
  }
}

#[tokio::test]
async fn recommend_without_title_on_small_catalog_returns_all() {
  let s = seeded(vec![game(1, "A", "RPG"), game(2, "B", "FPS")]).await;
  let recs = catalog::recommend(&s, None).await.unwrap();
  assert_eq!(recs.len(), 2);
}
