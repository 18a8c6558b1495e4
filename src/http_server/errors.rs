//! # HTTP Errors
//!
//! Maps book errors to a status code and a human message. The same domain
//! error can answer differently depending on the operation it came from.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::books::{BookError, ValidationError};

use super::response::FailResponse;

/// The book operation a request was performing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Get,
    Update,
    Delete,
}

/// A failed book request
#[derive(Debug)]
pub struct ApiError {
    operation: Operation,
    error: BookError,
}

impl ApiError {
    pub fn new(operation: Operation, error: BookError) -> Self {
        Self { operation, error }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match (&self.error, self.operation) {
            (BookError::InvalidPayload(_), _) => StatusCode::BAD_REQUEST,
            (BookError::InvalidId(_), _) => StatusCode::BAD_REQUEST,
            (BookError::Validation(_), _) => StatusCode::BAD_REQUEST,
            (BookError::NotFound(_), _) => StatusCode::NOT_FOUND,

            (BookError::Store(_), Operation::Create) => StatusCode::INTERNAL_SERVER_ERROR,
            (BookError::Store(_), Operation::Update) => StatusCode::INTERNAL_SERVER_ERROR,
            (BookError::Store(_), Operation::List) => StatusCode::BAD_REQUEST,
            (BookError::Store(_), Operation::Delete) => StatusCode::BAD_REQUEST,
            (BookError::Store(_), Operation::Get) => StatusCode::NOT_FOUND,
        }
    }

    /// Human readable message for the response body
    pub fn message(&self) -> String {
        match self.operation {
            Operation::Create => match &self.error {
                BookError::Validation(ValidationError::ReadPageExceedsPageCount) => {
                    "Failed to add book. readPage must not be greater than pageCount".to_string()
                }
                BookError::Validation(ValidationError::MissingField("name")) => {
                    "Failed to add book. Please fill in the book name".to_string()
                }
                BookError::Validation(ValidationError::MissingField(field)) => {
                    format!("Failed to add book. Please fill in {}", field)
                }
                BookError::InvalidPayload(_) => {
                    "Failed to add book. Request body is not a valid book".to_string()
                }
                _ => "Failed to add book".to_string(),
            },
            Operation::List => "Failed to fetch books".to_string(),
            Operation::Get => match &self.error {
                BookError::InvalidId(_) => "Invalid book id".to_string(),
                _ => "Book not found".to_string(),
            },
            Operation::Update => match &self.error {
                BookError::NotFound(_) => "Failed to update book. Id not found".to_string(),
                BookError::InvalidId(_) => "Failed to update book. Invalid book id".to_string(),
                BookError::Validation(ValidationError::ReadPageExceedsPageCount) => {
                    "Failed to update book. readPage must not be greater than pageCount"
                        .to_string()
                }
                BookError::Validation(_) | BookError::InvalidPayload(_) => {
                    "Failed to update book. Please fill in the book name".to_string()
                }
                BookError::Store(_) => "Failed to update book".to_string(),
            },
            Operation::Delete => match &self.error {
                BookError::NotFound(_) => "Failed to delete book. Id not found".to_string(),
                BookError::InvalidId(_) => "Failed to delete book. Invalid book id".to_string(),
                _ => "Failed to delete book".to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(FailResponse::new(self.message()));
        (status, body).into_response()
    }
}
