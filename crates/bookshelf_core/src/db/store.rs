//! Book store: one connection plus its identifier sequence.
//!
//! # Responsibility
//! - Verify a connection is migrated before any repository touches it.
//! - Hand out autocommit repositories and explicit units of work.
//! - Own the table reset used between isolated scenarios.
//!
//! # Invariants
//! - At most one unit of work is open per store (enforced by `&mut self`).
//! - The identifier sequence is shared by every repository of this store.

use super::migrations::{current_user_version, latest_version};
use super::open::{open_db, open_db_in_memory};
use super::sequence::IdSequence;
use super::unit_of_work::UnitOfWork;
use super::{DbError, DbResult};
use crate::repo::book_repo::SqliteBookRepository;
use log::{info, warn};
use rusqlite::Connection;
use std::path::Path;

const BOOKS_TABLE_INIT_SQL: &str = include_str!("sql/books_table_init.sql");
const REQUIRED_TABLES: &[&str] = &["books", "id_sequences"];

/// SQLite-backed home of the `books` table.
pub struct BookStore {
    conn: Connection,
    ids: IdSequence,
}

impl BookStore {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Self::from_connection(open_db(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Wraps an already migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not the latest.
    /// - `MissingRequiredTable` when the schema was tampered with.
    pub fn from_connection(conn: Connection) -> DbResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(&conn)?;
        if actual_version != expected_version {
            return Err(DbError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        for &table in REQUIRED_TABLES {
            if !table_exists(&conn, table)? {
                return Err(DbError::MissingRequiredTable(table));
            }
        }

        let ids = IdSequence::load(&conn)?;
        Ok(Self { conn, ids })
    }

    /// Returns a repository whose writes commit immediately.
    pub fn books(&self) -> SqliteBookRepository<'_> {
        SqliteBookRepository::new(&self.conn, &self.ids)
    }

    /// Starts an explicit unit of work.
    pub fn begin(&mut self) -> DbResult<UnitOfWork<'_>> {
        let tx = self.conn.transaction()?;
        Ok(UnitOfWork::new(tx, &self.ids))
    }

    /// Runs `work` in a unit of work: commit on `Ok`, rollback on `Err`.
    pub fn in_unit_of_work<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        F: FnOnce(&UnitOfWork<'_>) -> Result<T, E>,
        E: From<DbError>,
    {
        let uow = self.begin()?;
        match work(&uow) {
            Ok(value) => {
                uow.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = uow.rollback() {
                    warn!("event=uow_rollback module=db status=error error={rollback_err}");
                }
                Err(err)
            }
        }
    }

    /// Runs `work` in a unit of work that is always rolled back.
    ///
    /// Data changes never outlive the call; consumed identifiers do.
    pub fn rolled_back<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        F: FnOnce(&UnitOfWork<'_>) -> Result<T, E>,
        E: From<DbError>,
    {
        let uow = self.begin()?;
        let result = work(&uow);
        if let Err(rollback_err) = uow.rollback() {
            warn!("event=uow_rollback module=db status=error error={rollback_err}");
        }
        result
    }

    /// Drops and recreates the `books` table and rewinds the sequence.
    pub fn reset_books_table(&mut self) -> DbResult<()> {
        self.conn.execute_batch(BOOKS_TABLE_INIT_SQL)?;
        self.ids.reset();
        info!("event=books_reset module=db status=ok");
        Ok(())
    }

    /// Returns the most recently issued book identifier (0 when none).
    pub fn last_issued_id(&self) -> i64 {
        self.ids.last_issued()
    }

    /// Borrows the underlying connection for diagnostics and tests.
    ///
    /// Read-only use only: rows inserted here bypass the identifier
    /// sequence, and a later `save` without an id can collide with them.
    #[doc(hidden)]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(exists)
}
