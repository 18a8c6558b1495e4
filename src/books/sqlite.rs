//! # SQLite Book Store
//!
//! Books live in a single `books` table. The schema is created on open if it
//! does not exist yet.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row, ToSql};

use super::errors::{StoreError, StoreResult};
use super::model::{Book, BookFilter};
use super::store::BookStore;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS books (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    year INTEGER NOT NULL,
    author TEXT NOT NULL,
    summary TEXT NOT NULL,
    publisher TEXT NOT NULL,
    page_count INTEGER NOT NULL,
    read_page INTEGER NOT NULL,
    finished INTEGER NOT NULL,
    reading INTEGER NOT NULL,
    inserted_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const COLUMNS: &str = "id, name, year, author, summary, publisher, page_count, read_page, \
                       finished, reading, inserted_at, updated_at";

/// Book store backed by one SQLite connection
#[derive(Debug)]
pub struct SqliteBookStore {
    conn: Mutex<Option<Connection>>,
}

impl SqliteBookStore {
    /// Open (or create) the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> StoreResult<T> {
        let guard = self.lock()?;
        let conn = guard
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("store is closed".to_string()))?;
        Ok(f(conn)?)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Option<Connection>>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))
    }
}

impl BookStore for SqliteBookStore {
    fn insert(&self, book: &Book) -> StoreResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                &format!("INSERT INTO books ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"),
                params![
                    book.id,
                    book.name,
                    book.year,
                    book.author,
                    book.summary,
                    book.publisher,
                    book.page_count,
                    book.read_page,
                    book.finished,
                    book.reading,
                    book.inserted_at.to_rfc3339(),
                    book.updated_at.to_rfc3339(),
                ],
            )
            .map(|_| ())
        })
    }

    fn find_all(&self, filter: BookFilter) -> StoreResult<Vec<Book>> {
        let mut clauses = Vec::new();
        let mut values: Vec<bool> = Vec::new();

        if let Some(reading) = filter.reading {
            clauses.push("reading = ?");
            values.push(reading);
        }
        if let Some(finished) = filter.finished {
            clauses.push("finished = ?");
            values.push(finished);
        }

        let mut sql = format!("SELECT {COLUMNS} FROM books");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY rowid");

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let params: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
            let rows = stmt.query_map(params.as_slice(), book_from_row)?;
            rows.collect()
        })
    }

    fn find_by_id(&self, id: &str) -> StoreResult<Option<Book>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM books WHERE id = ?1"))?;
            let mut rows = stmt.query_map(params![id], book_from_row)?;
            rows.next().transpose()
        })
    }

    fn save(&self, book: &Book) -> StoreResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE books SET name = ?2, year = ?3, author = ?4, summary = ?5, \
                 publisher = ?6, page_count = ?7, read_page = ?8, finished = ?9, \
                 reading = ?10, updated_at = ?11 WHERE id = ?1",
                params![
                    book.id,
                    book.name,
                    book.year,
                    book.author,
                    book.summary,
                    book.publisher,
                    book.page_count,
                    book.read_page,
                    book.finished,
                    book.reading,
                    book.updated_at.to_rfc3339(),
                ],
            )
            .map(|_| ())
        })
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        self.with_conn(|conn| conn.execute("DELETE FROM books WHERE id = ?1", params![id]).map(|_| ()))
    }

    fn close(&self) -> StoreResult<()> {
        let mut guard = self.lock()?;
        match guard.take() {
            Some(conn) => conn.close().map_err(|(_, e)| StoreError::from(e)),
            None => Ok(()),
        }
    }
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        name: row.get(1)?,
        year: row.get(2)?,
        author: row.get(3)?,
        summary: row.get(4)?,
        publisher: row.get(5)?,
        page_count: row.get(6)?,
        read_page: row.get(7)?,
        finished: row.get(8)?,
        reading: row.get(9)?,
        inserted_at: timestamp(row, 10)?,
        updated_at: timestamp(row, 11)?,
    })
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
