//! Core persistence logic for Bookshelf.
//! Books flow in as request shapes, are stored through a repository and leave
//! as response shapes.

pub mod config;
pub mod db;
pub mod dto;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use db::{BookStore, DbError, DbResult, UnitOfWork};
pub use dto::book::{BookResponse, BookSaveRequest, DtoError};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::book::{Book, BookId};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use service::book_service::{BookService, ServiceError, ServiceResult};

/// Minimal health-check API for host wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
