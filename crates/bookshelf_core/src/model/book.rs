//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted in the `books` table.
//! - Keep identity assignment out of caller hands.
//!
//! # Invariants
//! - `id` is `None` until the first successful save.
//! - Once assigned, `id` never changes for the lifetime of the record.
//! - `title` and `author` carry no constraints; absent stays absent.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a persisted book.
pub type BookId = i64;

/// Canonical domain record for a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: Option<BookId>,
    /// Book title.
    pub title: Option<String>,
    /// Book author.
    pub author: Option<String>,
}

impl Book {
    /// Creates an unpersisted book with both business fields set.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            author: Some(author.into()),
        }
    }

    /// Creates a book with a known identifier.
    ///
    /// Used when a caller targets an existing row for replacement.
    pub fn with_id(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: Some(title.into()),
            author: Some(author.into()),
        }
    }

    /// Assembles a book from optional parts, as read from storage or DTOs.
    pub fn from_parts(id: Option<BookId>, title: Option<String>, author: Option<String>) -> Self {
        Self { id, title, author }
    }

    pub fn id(&self) -> Option<BookId> {
        self.id
    }

    /// Returns whether the store has assigned an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
