//! # Response Envelopes
//!
//! Every response body is wrapped as `{status, message?, data?}`.

use serde::Serialize;

/// Successful response
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl SuccessResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Failed response
#[derive(Debug, Clone, Serialize)]
pub struct FailResponse {
    pub status: &'static str,
    pub message: String,
}

impl FailResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "fail",
            message: message.into(),
        }
    }
}

/// `data` of a create response
#[derive(Debug, Clone, Serialize)]
pub struct CreatedData {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

/// `data` of a list response
#[derive(Debug, Clone, Serialize)]
pub struct BooksData<T: Serialize> {
    pub books: Vec<T>,
}

/// `data` of a fetch-by-id response
#[derive(Debug, Clone, Serialize)]
pub struct BookData<T: Serialize> {
    pub book: T,
}
