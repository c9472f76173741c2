//! SQL schema for the catalog SQLite store.
//!
//! Executed every time a connection is opened. `PRAGMA user_version` records
//! the layout so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Reference data. Loaded by import, never touched on the request path.
CREATE TABLE IF NOT EXISTS games (
    id          INTEGER PRIMARY KEY,
    title       TEXT NOT NULL,
    genre       TEXT NOT NULL,
    year        INTEGER,
    developer   TEXT,
    publisher   TEXT,
    platform    TEXT,
    criticscore REAL,
    userscore   REAL,
    poster      TEXT
);

-- Append-only play log. Columns after game_id are a snapshot of the game at
-- the time it was played; game_id is deliberately not unique.
CREATE TABLE IF NOT EXISTS played_games (
    play_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id     INTEGER NOT NULL,
    title       TEXT NOT NULL,
    year        INTEGER,
    genre       TEXT NOT NULL,
    criticscore REAL,
    played_at   TEXT NOT NULL   -- ISO 8601 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS games_genre_idx ON games(genre);
CREATE INDEX IF NOT EXISTS games_title_idx ON games(title);

PRAGMA user_version = 1;
";
