//! # Book Service
//!
//! Validation and transformation between request input, stored records and
//! the views returned to callers. All persistence goes through the injected
//! `BookStore`.

use std::sync::Arc;

use chrono::Utc;

use crate::id;
use crate::observability::{log_event_with_fields, Event};

use super::errors::{BookError, BookResult, StoreError, ValidationError};
use super::model::{Book, BookSummary, CreateBookInput, ListQuery, UpdateBookInput};
use super::store::BookStore;

/// Book operations over a store
#[derive(Debug, Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
    id_source: fn() -> String,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            store,
            id_source: id::generate,
        }
    }

    /// Use a different id generator
    pub fn with_id_source(mut self, id_source: fn() -> String) -> Self {
        self.id_source = id_source;
        self
    }

    /// Validate and persist a new book, returning its id
    pub fn create(&self, input: CreateBookInput) -> BookResult<String> {
        let fields = validate_create(input).map_err(rejected)?;

        let now = Utc::now();
        let book = Book {
            id: (self.id_source)(),
            finished: fields.read_page == fields.page_count,
            reading: fields.reading == 1,
            name: fields.name,
            year: fields.year,
            author: fields.author,
            summary: fields.summary,
            publisher: fields.publisher,
            page_count: fields.page_count,
            read_page: fields.read_page,
            inserted_at: now,
            updated_at: now,
        };

        self.store.insert(&book).map_err(store_failure)?;

        log_event_with_fields(Event::BookCreated, &[("book_id", &book.id)]);
        Ok(book.id)
    }

    /// All books matching the query, projected to `{id, name, publisher}`
    pub fn list(&self, query: &ListQuery) -> BookResult<Vec<BookSummary>> {
        let books = self.store.find_all(query.to_filter()).map_err(store_failure)?;
        Ok(books.iter().map(Book::summary).collect())
    }

    /// The full record for `id`
    pub fn get(&self, id: &str) -> BookResult<Book> {
        self.store
            .find_by_id(id)
            .map_err(store_failure)?
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    /// Returns true if a book with `id` is stored
    pub fn exists(&self, id: &str) -> BookResult<bool> {
        Ok(self.store.find_by_id(id).map_err(store_failure)?.is_some())
    }

    /// Replace the editable fields of an existing book.
    ///
    /// `finished` is not recomputed from the new page counts.
    pub fn update(&self, id: &str, input: UpdateBookInput) -> BookResult<()> {
        let mut book = self.get(id)?;

        validate_update(&input).map_err(rejected)?;

        book.apply_update(input, Utc::now());
        self.store.save(&book).map_err(store_failure)?;

        log_event_with_fields(Event::BookUpdated, &[("book_id", id)]);
        Ok(())
    }

    /// Permanently remove a book
    pub fn delete(&self, id: &str) -> BookResult<()> {
        let book = self.get(id)?;
        self.store.delete_by_id(&book.id).map_err(store_failure)?;

        log_event_with_fields(Event::BookDeleted, &[("book_id", id)]);
        Ok(())
    }
}

/// Create input with every required field present
struct ValidCreate {
    name: String,
    year: i64,
    author: String,
    summary: String,
    publisher: String,
    page_count: i64,
    read_page: i64,
    reading: i64,
}

fn validate_create(input: CreateBookInput) -> Result<ValidCreate, ValidationError> {
    let fields = ValidCreate {
        name: required_text(input.name, "name")?,
        year: required_number(input.year, "year")?,
        author: required_text(input.author, "author")?,
        summary: required_text(input.summary, "summary")?,
        publisher: required_text(input.publisher, "publisher")?,
        page_count: required_number(input.page_count, "pageCount")?,
        read_page: required_number(input.read_page, "readPage")?,
        // 0 is a meaningful value here, only absence is rejected
        reading: input.reading.ok_or(ValidationError::MissingField("reading"))?,
    };

    if fields.read_page > fields.page_count {
        return Err(ValidationError::ReadPageExceedsPageCount);
    }

    Ok(fields)
}

fn validate_update(input: &UpdateBookInput) -> Result<(), ValidationError> {
    if input.name.is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    if input.read_page > input.page_count {
        return Err(ValidationError::ReadPageExceedsPageCount);
    }
    Ok(())
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

/// Zero is indistinguishable from absent for numeric fields
fn required_number(value: Option<i64>, field: &'static str) -> Result<i64, ValidationError> {
    value
        .filter(|v| *v != 0)
        .ok_or(ValidationError::MissingField(field))
}

fn rejected(err: ValidationError) -> BookError {
    log_event_with_fields(Event::BookRejected, &[("reason", &err.to_string())]);
    BookError::Validation(err)
}

fn store_failure(err: StoreError) -> BookError {
    log_event_with_fields(Event::StoreFailure, &[("reason", &err.to_string())]);
    BookError::Store(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::books::memory::MemoryBookStore;
    use crate::books::model::BookFilter;

    fn service() -> (BookService, Arc<MemoryBookStore>) {
        let store = Arc::new(MemoryBookStore::new());
        (BookService::new(store.clone()), store)
    }

    fn create_input() -> CreateBookInput {
        CreateBookInput {
            name: Some("Go".to_string()),
            year: Some(2020),
            author: Some("A".to_string()),
            summary: Some("S".to_string()),
            publisher: Some("P".to_string()),
            page_count: Some(200),
            read_page: Some(200),
            reading: Some(0),
        }
    }

    fn update_input() -> UpdateBookInput {
        UpdateBookInput {
            name: "Rust".to_string(),
            year: 2021,
            author: "B".to_string(),
            summary: "T".to_string(),
            publisher: "Q".to_string(),
            page_count: 300,
            read_page: 20,
            reading: true,
        }
    }

    #[test]
    fn test_create_derives_flags() {
        let (service, _) = service();
        let id = service.create(create_input()).unwrap();
        let book = service.get(&id).unwrap();

        assert_eq!(book.id, id);
        assert!(book.finished);
        assert!(!book.reading);
        assert_eq!(book.inserted_at, book.updated_at);

        let id = service
            .create(CreateBookInput {
                read_page: Some(50),
                reading: Some(1),
                ..create_input()
            })
            .unwrap();
        let book = service.get(&id).unwrap();
        assert!(!book.finished);
        assert!(book.reading);
    }

    #[test]
    fn test_create_rejects_missing_fields() {
        let (service, store) = service();

        let cases = [
            (CreateBookInput { name: None, ..create_input() }, "name"),
            (CreateBookInput { name: Some(String::new()), ..create_input() }, "name"),
            (CreateBookInput { year: Some(0), ..create_input() }, "year"),
            (CreateBookInput { author: None, ..create_input() }, "author"),
            (CreateBookInput { summary: Some(String::new()), ..create_input() }, "summary"),
            (CreateBookInput { publisher: None, ..create_input() }, "publisher"),
            (CreateBookInput { page_count: Some(0), ..create_input() }, "pageCount"),
            (CreateBookInput { read_page: None, ..create_input() }, "readPage"),
            (CreateBookInput { reading: None, ..create_input() }, "reading"),
        ];

        for (input, field) in cases {
            assert_eq!(
                service.create(input),
                Err(BookError::Validation(ValidationError::MissingField(field)))
            );
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rejects_read_page_over_page_count() {
        let (service, store) = service();
        let result = service.create(CreateBookInput {
            read_page: Some(201),
            ..create_input()
        });

        assert_eq!(
            result,
            Err(BookError::Validation(ValidationError::ReadPageExceedsPageCount))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_surfaces_store_failure() {
        let (service, store) = service();
        let service = service.with_id_source(|| "fixed-id".to_string());

        service.create(create_input()).unwrap();
        let err = service.create(create_input()).unwrap_err();

        assert_eq!(err, BookError::Store(StoreError::Conflict("fixed-id".to_string())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_list_projects_and_filters() {
        let (service, _) = service();
        let reading_id = service
            .create(CreateBookInput { reading: Some(1), ..create_input() })
            .unwrap();
        service.create(create_input()).unwrap();

        let all = service.list(&ListQuery::default()).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Go");
        assert_eq!(all[0].publisher, "P");

        let reading = service
            .list(&ListQuery {
                reading: Some("1".to_string()),
                finished: None,
            })
            .unwrap();
        assert_eq!(reading.len(), 1);
        assert_eq!(reading[0].id, reading_id);
    }

    #[test]
    fn test_update_replaces_fields_but_not_finished() {
        let (service, _) = service();
        let id = service.create(create_input()).unwrap();
        let before = service.get(&id).unwrap();

        service.update(&id, update_input()).unwrap();
        let after = service.get(&id).unwrap();

        assert_eq!(after.name, "Rust");
        assert_eq!(after.page_count, 300);
        assert_eq!(after.read_page, 20);
        assert!(after.reading);
        assert!(after.finished);
        assert_eq!(after.inserted_at, before.inserted_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[test]
    fn test_update_unknown_id() {
        let (service, store) = service();
        service.create(create_input()).unwrap();

        assert_eq!(
            service.update("nope", update_input()),
            Err(BookError::NotFound("nope".to_string()))
        );
        assert_eq!(store.find_all(BookFilter::default()).unwrap()[0].name, "Go");
    }

    #[test]
    fn test_update_validation_leaves_record() {
        let (service, _) = service();
        let id = service.create(create_input()).unwrap();
        let before = service.get(&id).unwrap();

        assert_eq!(
            service.update(&id, UpdateBookInput { read_page: 301, ..update_input() }),
            Err(BookError::Validation(ValidationError::ReadPageExceedsPageCount))
        );
        assert_eq!(
            service.update(&id, UpdateBookInput { name: String::new(), ..update_input() }),
            Err(BookError::Validation(ValidationError::MissingField("name")))
        );
        assert_eq!(service.get(&id).unwrap(), before);
    }

    #[test]
    fn test_delete_is_permanent() {
        let (service, _) = service();
        let id = service.create(create_input()).unwrap();

        service.delete(&id).unwrap();
        assert_eq!(service.get(&id), Err(BookError::NotFound(id.clone())));
        assert_eq!(service.delete(&id), Err(BookError::NotFound(id.clone())));
        assert!(!service.exists(&id).unwrap());
    }
}
