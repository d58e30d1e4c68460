//! Book use-case service.
//!
//! # Responsibility
//! - Run the boundary flow: request shape -> record -> repository -> response.
//! - Keep callers decoupled from storage and record types.
//!
//! # Invariants
//! - Every response is built from the repository's stored copy.
//! - Lookup misses stay `None`; only conversion and storage failures are errors.

use crate::db::DbError;
use crate::dto::book::{BookResponse, BookSaveRequest, DtoError};
use crate::model::book::{Book, BookId};
use crate::repo::book_repo::{BookRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for book use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Record could not be shaped for the caller.
    Dto(DtoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Dto(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Dto(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

impl From<DtoError> for ServiceError {
    fn from(value: DtoError) -> Self {
        Self::Dto(value)
    }
}

/// Book service facade over repository implementations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new book and returns its response shape.
    pub fn register(&self, request: &BookSaveRequest) -> ServiceResult<BookResponse> {
        let stored = self.repo.save(&request.to_entity())?;
        Ok(BookResponse::try_from(stored)?)
    }

    pub fn get(&self, id: BookId) -> ServiceResult<Option<BookResponse>> {
        self.repo
            .find_by_id(id)?
            .map(BookResponse::try_from)
            .transpose()
            .map_err(ServiceError::from)
    }

    /// Lists every book in ascending id order.
    pub fn list(&self) -> ServiceResult<Vec<BookResponse>> {
        let responses = self
            .repo
            .find_all()?
            .into_iter()
            .map(BookResponse::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(responses)
    }

    /// Replaces title/author of book `id`, creating the row when absent.
    pub fn update(&self, id: BookId, request: &BookSaveRequest) -> ServiceResult<BookResponse> {
        let book = Book::from_parts(Some(id), request.title.clone(), request.author.clone());
        let stored = self.repo.save(&book)?;
        Ok(BookResponse::try_from(stored)?)
    }

    /// Deletes book `id`; a missing id is not an error.
    pub fn delete(&self, id: BookId) -> ServiceResult<()> {
        self.repo.delete_by_id(id)?;
        Ok(())
    }
}
