//! Error types for `gamerec-core`.

use thiserror::Error;

/// Request validation failures raised before any store access.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
  #[error("genre must not be empty")]
  EmptyGenre,

  #[error("criticscore must be a number, got {0:?}")]
  InvalidCriticScore(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
