//! Domain model for the bookshelf core.
//!
//! # Responsibility
//! - Define canonical data structures used by persistence and DTO layers.
//!
//! # Invariants
//! - Every persisted domain object is identified by a store-assigned `BookId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod book;
