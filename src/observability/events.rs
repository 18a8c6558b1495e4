//! Observable events for bookshelf
//!
//! Events are explicit and typed so every log line carries a stable name.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Book store opened and schema ensured
    StoreOpened,
    /// HTTP listener bound, ready to serve
    Serving,
    /// Shutdown initiated
    ShutdownStart,
    /// Shutdown complete, store closed
    ShutdownComplete,

    // Book lifecycle
    /// Book created
    BookCreated,
    /// Book updated
    BookUpdated,
    /// Book deleted
    BookDeleted,
    /// Request rejected by validation
    BookRejected,

    // Failures
    /// Store operation failed
    StoreFailure,
    /// Random source for ids failed (FATAL)
    IdSourceFailure,

    // HTTP
    /// One request served
    HttpRequest,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOKSHELF_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::Serving => "BOOKSHELF_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::BookCreated => "BOOK_CREATED",
            Event::BookUpdated => "BOOK_UPDATED",
            Event::BookDeleted => "BOOK_DELETED",
            Event::BookRejected => "BOOK_REJECTED",

            Event::StoreFailure => "STORE_FAILURE",
            Event::IdSourceFailure => "ID_SOURCE_FAILURE",

            Event::HttpRequest => "HTTP_REQUEST",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::IdSourceFailure)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::BootStart,
            Event::ConfigLoaded,
            Event::StoreOpened,
            Event::Serving,
            Event::ShutdownStart,
            Event::ShutdownComplete,
            Event::BookCreated,
            Event::BookUpdated,
            Event::BookDeleted,
            Event::BookRejected,
            Event::StoreFailure,
            Event::IdSourceFailure,
            Event::HttpRequest,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_fatal_events() {
        assert!(Event::IdSourceFailure.is_fatal());
        assert!(!Event::StoreFailure.is_fatal());
        assert!(!Event::BookCreated.is_fatal());
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::BootStart), "BOOKSHELF_STARTUP_BEGIN");
        assert_eq!(format!("{}", Event::BookDeleted), "BOOK_DELETED");
    }
}
