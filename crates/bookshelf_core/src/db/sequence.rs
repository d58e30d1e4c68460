//! Book identifier sequence.
//!
//! # Responsibility
//! - Hand out strictly increasing book identifiers.
//! - Mirror the last issued value into `id_sequences` for later sessions.
//!
//! # Invariants
//! - The in-process counter only moves forward, except on explicit reset.
//! - Rolling back the transaction that issued an identifier does not rewind
//!   the counter. SQLite's own `AUTOINCREMENT` bookkeeping is transactional,
//!   so the counter is kept outside the transaction.
//! - On open, the counter resumes from the larger of the mirrored value and
//!   the highest stored `books.id`. Identifiers issued only inside rolled-back
//!   work may therefore be issued again by a later process.

use super::{DbError, DbResult};
use log::debug;
use rusqlite::{params, Connection};
use std::cell::Cell;

const BOOKS_SEQUENCE: &str = "books";

/// Identifier allocator for the `books` table.
#[derive(Debug)]
pub struct IdSequence {
    last_issued: Cell<i64>,
}

impl IdSequence {
    /// Resumes the sequence from persisted state on `conn`.
    pub fn load(conn: &Connection) -> DbResult<Self> {
        let last_issued = conn.query_row(
            "SELECT MAX(
                COALESCE((SELECT last_value FROM id_sequences WHERE name = ?1), 0),
                COALESCE((SELECT MAX(id) FROM books), 0)
            );",
            [BOOKS_SEQUENCE],
            |row| row.get::<_, i64>(0),
        )?;
        debug!("event=sequence_load module=db status=ok last_issued={last_issued}");
        Ok(Self {
            last_issued: Cell::new(last_issued),
        })
    }

    /// Issues the next identifier.
    ///
    /// The mirror write runs on `conn` and follows its transaction; the
    /// in-process counter advances regardless.
    ///
    /// # Errors
    /// - `SequenceExhausted` once `i64::MAX` has been issued or observed.
    pub fn next_id(&self, conn: &Connection) -> DbResult<i64> {
        let last_issued = self.last_issued.get();
        let id = last_issued
            .checked_add(1)
            .ok_or(DbError::SequenceExhausted { last_issued })?;
        mirror(conn, id)?;
        self.last_issued.set(id);
        debug!("event=sequence_next module=db status=ok id={id}");
        Ok(id)
    }

    /// Raises the counter to at least `id`.
    ///
    /// Called after writes with caller-chosen identifiers so later
    /// allocations never collide with them.
    pub fn observe(&self, conn: &Connection, id: i64) -> DbResult<()> {
        if id <= self.last_issued.get() {
            return Ok(());
        }
        mirror(conn, id)?;
        self.last_issued.set(id);
        Ok(())
    }

    /// Returns the most recently issued identifier, or 0 when none was.
    pub fn last_issued(&self) -> i64 {
        self.last_issued.get()
    }

    /// Rewinds the counter to zero. Only valid after the table was recreated.
    pub(crate) fn reset(&self) {
        self.last_issued.set(0);
    }
}

fn mirror(conn: &Connection, id: i64) -> DbResult<()> {
    conn.execute(
        "INSERT INTO id_sequences (name, last_value) VALUES (?1, ?2)
         ON CONFLICT(name) DO UPDATE SET last_value = MAX(last_value, excluded.last_value);",
        params![BOOKS_SEQUENCE, id],
    )?;
    Ok(())
}
