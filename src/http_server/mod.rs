//! # Bookshelf HTTP Server Module
//!
//! Axum server exposing the book resource.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/books` - Create and list books
//! - `/books/:book_id` - Fetch, update and delete one book

pub mod book_routes;
pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, Operation};
pub use server::HttpServer;
