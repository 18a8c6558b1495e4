//! # In-Memory Book Store
//!
//! Insertion-ordered table held in process memory. Used by tests and by
//! `serve` when no database path is configured.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::{StoreError, StoreResult};
use super::model::{Book, BookFilter};
use super::store::BookStore;

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Book>,
    closed: bool,
}

/// In-memory book store
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    table: RwLock<Table>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.table.read().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Table>> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::Unavailable("table lock poisoned".to_string()))?;
        if table.closed {
            return Err(StoreError::Unavailable("store is closed".to_string()));
        }
        Ok(table)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Table>> {
        let table = self
            .table
            .write()
            .map_err(|_| StoreError::Unavailable("table lock poisoned".to_string()))?;
        if table.closed {
            return Err(StoreError::Unavailable("store is closed".to_string()));
        }
        Ok(table)
    }
}

impl BookStore for MemoryBookStore {
    fn insert(&self, book: &Book) -> StoreResult<()> {
        let mut table = self.write()?;
        if table.rows.iter().any(|b| b.id == book.id) {
            return Err(StoreError::Conflict(book.id.clone()));
        }
        table.rows.push(book.clone());
        Ok(())
    }

    fn find_all(&self, filter: BookFilter) -> StoreResult<Vec<Book>> {
        let table = self.read()?;
        Ok(table.rows.iter().filter(|b| filter.matches(b)).cloned().collect())
    }

    fn find_by_id(&self, id: &str) -> StoreResult<Option<Book>> {
        let table = self.read()?;
        Ok(table.rows.iter().find(|b| b.id == id).cloned())
    }

    fn save(&self, book: &Book) -> StoreResult<()> {
        let mut table = self.write()?;
        if let Some(row) = table.rows.iter_mut().find(|b| b.id == book.id) {
            *row = book.clone();
        }
        Ok(())
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let mut table = self.write()?;
        table.rows.retain(|b| b.id != id);
        Ok(())
    }

    fn close(&self) -> StoreResult<()> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StoreError::Unavailable("table lock poisoned".to_string()))?;
        table.closed = true;
        Ok(())
    }
}
