//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide save/find/delete over the `books` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `save` without an id always gets a fresh id from `IdSequence`.
//! - `save` with an id replaces that row and never changes the id.
//! - Misses are `Ok(None)`/no-ops, never errors.

use crate::db::{DbError, IdSequence};
use crate::model::book::{Book, BookId};
use log::{debug, info};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT id, title, author FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for book CRUD operations.
pub trait BookRepository {
    /// Inserts (no id) or replaces by id; returns the stored copy.
    fn save(&self, book: &Book) -> RepoResult<Book>;
    fn find_by_id(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Lists all books in ascending id order.
    fn find_all(&self) -> RepoResult<Vec<Book>>;
    /// Removes the book if present.
    fn delete_by_id(&self, id: BookId) -> RepoResult<()>;
}

/// SQLite-backed book repository.
///
/// Works against a plain connection (autocommit) or a unit of work's
/// transaction; both deref to `Connection`.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
    ids: &'conn IdSequence,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection, ids: &'conn IdSequence) -> Self {
        Self { conn, ids }
    }

    fn insert(&self, book: &Book) -> RepoResult<Book> {
        let id = self.ids.next_id(self.conn)?;
        let stored = self.write_returning(
            "INSERT INTO books (id, title, author) VALUES (?1, ?2, ?3)
             RETURNING id, title, author;",
            id,
            book,
        )?;
        info!("event=book_save module=repo status=ok op=insert id={id}");
        Ok(stored)
    }

    fn replace(&self, id: BookId, book: &Book) -> RepoResult<Book> {
        let stored = self.write_returning(
            "INSERT INTO books (id, title, author) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                author = excluded.author
             RETURNING id, title, author;",
            id,
            book,
        )?;
        self.ids.observe(self.conn, id)?;
        info!("event=book_save module=repo status=ok op=replace id={id}");
        Ok(stored)
    }

    fn write_returning(&self, sql: &str, id: BookId, book: &Book) -> RepoResult<Book> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params![id, book.title.as_deref(), book.author.as_deref()])?;
        if let Some(row) = rows.next()? {
            return parse_book_row(row);
        }

        Err(RepoError::InvalidData(format!(
            "write for id {id} returned no row"
        )))
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn save(&self, book: &Book) -> RepoResult<Book> {
        match book.id() {
            None => self.insert(book),
            Some(id) => self.replace(id, book),
        }
    }

    fn find_by_id(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        let book = match rows.next()? {
            Some(row) => Some(parse_book_row(row)?),
            None => None,
        };
        debug!(
            "event=book_find module=repo status=ok id={id} found={}",
            book.is_some()
        );
        Ok(book)
    }

    fn find_all(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn delete_by_id(&self, id: BookId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1;", [id])?;
        info!("event=book_delete module=repo status=ok id={id} changed={changed}");
        Ok(())
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id: BookId = row.get("id")?;
    Ok(Book::from_parts(
        Some(id),
        read_text(row, "title")?,
        read_text(row, "author")?,
    ))
}

fn read_text(row: &Row<'_>, column: &'static str) -> RepoResult<Option<String>> {
    match row.get_ref(column)? {
        ValueRef::Null => Ok(None),
        ValueRef::Text(bytes) => String::from_utf8(bytes.to_vec())
            .map(Some)
            .map_err(|_| RepoError::InvalidData(format!("non UTF-8 text in books.{column}"))),
        other => Err(RepoError::InvalidData(format!(
            "expected text in books.{column}, found {}",
            other.data_type()
        ))),
    }
}
