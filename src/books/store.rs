//! # Book Store Trait

use super::errors::StoreResult;
use super::model::{Book, BookFilter};

/// Persistence for book records, one row per book keyed by `id`
pub trait BookStore: Send + Sync + std::fmt::Debug {
    /// Persist a new row; `Conflict` if the id is taken
    fn insert(&self, book: &Book) -> StoreResult<()>;

    /// All rows matching every present constraint, in insertion order
    fn find_all(&self, filter: BookFilter) -> StoreResult<Vec<Book>>;

    /// The row with this id, if any
    fn find_by_id(&self, id: &str) -> StoreResult<Option<Book>>;

    /// Overwrite the mutable fields of an existing row
    fn save(&self, book: &Book) -> StoreResult<()>;

    /// Remove the row with this id
    fn delete_by_id(&self, id: &str) -> StoreResult<()>;

    /// Release the underlying resources. Further calls fail with `Unavailable`.
    fn close(&self) -> StoreResult<()>;
}
