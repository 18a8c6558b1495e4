//! bookshelf - track books and reading progress over HTTP
//!
//! A single `books` table behind a small JSON API:
//!
//! - `books` - model, validation and persistence
//! - `id` - book id generation
//! - `http_server` - axum routes and server
//! - `observability` - structured logging
//! - `cli` - config loading and the `init` / `serve` commands

pub mod books;
pub mod cli;
pub mod http_server;
pub mod id;
pub mod observability;
