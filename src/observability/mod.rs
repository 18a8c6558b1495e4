//! Observability for bookshelf
//!
//! Structured JSON logging of lifecycle, book and request events.
//!
//! # Usage
//!
//! ```ignore
//! use bookshelf::observability::{log_event, log_event_with_fields, Event};
//!
//! log_event(Event::Serving);
//! log_event_with_fields(Event::BookCreated, &[("book_id", &id)]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Severity an event is logged at
fn severity_for(event: Event) -> Severity {
    match event {
        e if e.is_fatal() => Severity::Fatal,
        Event::StoreFailure => Severity::Error,
        Event::BookRejected => Severity::Warn,
        _ => Severity::Info,
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_for(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}
