//! # Book Model
//!
//! The stored record, the input shapes accepted by the service and the
//! projections returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored book
///
/// Serializes to the public view with every field, camelCased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub year: i64,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i64,
    pub read_page: i64,
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Reduced projection used by listings
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }

    /// Replace the user-editable fields and refresh `updated_at`.
    ///
    /// `id`, `inserted_at` and `finished` are left as they were.
    pub fn apply_update(&mut self, input: UpdateBookInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.year = input.year;
        self.author = input.author;
        self.summary = input.summary;
        self.publisher = input.publisher;
        self.page_count = input.page_count;
        self.read_page = input.read_page;
        self.reading = input.reading;
        self.updated_at = now;
    }
}

/// Listing projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

/// Body of a create request
///
/// Every field is optional at the decoding stage so that absence can be
/// reported as a validation failure naming the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookInput {
    pub name: Option<String>,
    pub year: Option<i64>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i64>,
    pub read_page: Option<i64>,
    /// 1 marks the book as being read, any other value does not
    pub reading: Option<i64>,
}

/// Body of an update request
///
/// Missing fields decode to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateBookInput {
    pub name: String,
    pub year: i64,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i64,
    pub read_page: i64,
    pub reading: bool,
}

/// Constraints applied by `BookStore::find_all`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl BookFilter {
    /// Returns true if the book satisfies every present constraint
    pub fn matches(&self, book: &Book) -> bool {
        self.reading.map_or(true, |r| book.reading == r)
            && self.finished.map_or(true, |f| book.finished == f)
    }
}

/// Raw listing query (`?reading=1&finished=0`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub reading: Option<String>,
    pub finished: Option<String>,
}

impl ListQuery {
    /// Build from decoded query pairs.
    ///
    /// When a key repeats, its first value is kept. Unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "reading" => &mut query.reading,
                "finished" => &mut query.finished,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// Convert to a store filter.
    ///
    /// An empty value counts as absent; "1" is true, anything else false.
    pub fn to_filter(&self) -> BookFilter {
        BookFilter {
            reading: flag(self.reading.as_deref()),
            finished: flag(self.finished.as_deref()),
        }
    }
}

fn flag(value: Option<&str>) -> Option<bool> {
    match value {
        None | Some("") => None,
        Some(v) => Some(v == "1"),
    }
}
