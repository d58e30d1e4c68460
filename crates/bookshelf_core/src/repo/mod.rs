//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for the domain record.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories do no validation; they pass records straight to storage.
//! - Storage faults surface as `RepoError::Db` and are never retried.

pub mod book_repo;
