//! Core types and trait definitions for the game catalog service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::CatalogStore`]; the operations in
//! [`catalog`] are written against that trait only.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod error;
pub mod game;
pub mod store;

pub use error::{Error, Result};
