//! Explicit transaction scope for repository work.
//!
//! # Invariants
//! - Every unit of work ends in exactly one commit or rollback.
//! - Dropping an unfinished unit of work rolls it back.
//! - Identifiers issued inside a rolled-back unit stay consumed.

use super::sequence::IdSequence;
use super::DbResult;
use crate::repo::book_repo::SqliteBookRepository;
use log::debug;
use rusqlite::{DropBehavior, Transaction};

/// One isolated group of data mutations.
pub struct UnitOfWork<'store> {
    tx: Transaction<'store>,
    ids: &'store IdSequence,
}

impl<'store> UnitOfWork<'store> {
    pub(crate) fn new(mut tx: Transaction<'store>, ids: &'store IdSequence) -> Self {
        tx.set_drop_behavior(DropBehavior::Rollback);
        debug!("event=uow_begin module=db status=ok");
        Self { tx, ids }
    }

    /// Returns a book repository bound to this unit of work.
    pub fn books(&self) -> SqliteBookRepository<'_> {
        SqliteBookRepository::new(&self.tx, self.ids)
    }

    /// Makes all mutations durable.
    pub fn commit(self) -> DbResult<()> {
        self.tx.commit()?;
        debug!("event=uow_commit module=db status=ok");
        Ok(())
    }

    /// Discards all mutations.
    pub fn rollback(self) -> DbResult<()> {
        self.tx.rollback()?;
        debug!(
            "event=uow_rollback module=db status=ok last_issued_id={}",
            self.ids.last_issued()
        );
        Ok(())
    }
}
