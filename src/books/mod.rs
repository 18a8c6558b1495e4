//! # Books
//!
//! The book resource: model, validation and persistence.
//!
//! # Components
//!
//! - `model` - stored record, request input and projections
//! - `store` - persistence trait
//! - `sqlite` / `memory` - store implementations
//! - `service` - validation and lifecycle operations

pub mod errors;
pub mod memory;
pub mod model;
pub mod service;
pub mod sqlite;
pub mod store;

pub use errors::{BookError, BookResult, StoreError, StoreResult, ValidationError};
pub use memory::MemoryBookStore;
pub use model::{Book, BookFilter, BookSummary, CreateBookInput, ListQuery, UpdateBookInput};
pub use service::BookService;
pub use sqlite::SqliteBookStore;
pub use store::BookStore;
