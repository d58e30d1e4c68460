//! Request/response shapes for the book boundary.
//!
//! # Responsibility
//! - Map inbound request data to an unpersisted `Book`.
//! - Map a persisted `Book` to an immutable outbound response.
//!
//! # Invariants
//! - Inbound conversion never assigns an identifier.
//! - Outbound conversion requires an identifier; title/author are copied as-is.

use crate::model::book::{Book, BookId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Conversion error for boundary shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DtoError {
    /// The source record is not in a state the target shape can represent.
    InvalidState(&'static str),
}

impl Display for DtoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidState(details) => write!(f, "invalid book state: {details}"),
        }
    }
}

impl Error for DtoError {}

/// Inbound shape for creating or replacing a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSaveRequest {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl BookSaveRequest {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
        }
    }

    /// Builds a new, unpersisted domain record.
    pub fn to_entity(&self) -> Book {
        Book::from_parts(None, self.title.clone(), self.author.clone())
    }
}

impl From<BookSaveRequest> for Book {
    fn from(value: BookSaveRequest) -> Self {
        Book::from_parts(None, value.title, value.author)
    }
}

/// Outbound shape for a persisted book.
///
/// All fields are fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookResponse {
    id: BookId,
    title: Option<String>,
    author: Option<String>,
}

impl BookResponse {
    pub fn new(id: BookId, title: Option<String>, author: Option<String>) -> Self {
        Self { id, title, author }
    }

    /// Copies a persisted record into a response.
    ///
    /// # Errors
    /// - `DtoError::InvalidState` when `book` has never been saved.
    pub fn from_entity(book: &Book) -> Result<Self, DtoError> {
        let id = book
            .id()
            .ok_or(DtoError::InvalidState("book has no identifier; save it first"))?;
        Ok(Self::new(id, book.title.clone(), book.author.clone()))
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

impl TryFrom<&Book> for BookResponse {
    type Error = DtoError;

    fn try_from(value: &Book) -> Result<Self, Self::Error> {
        Self::from_entity(value)
    }
}

impl TryFrom<Book> for BookResponse {
    type Error = DtoError;

    fn try_from(value: Book) -> Result<Self, Self::Error> {
        let id = value
            .id()
            .ok_or(DtoError::InvalidState("book has no identifier; save it first"))?;
        Ok(Self::new(id, value.title, value.author))
    }
}
