//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate DTO conversion and repository calls into use-case APIs.
//! - Keep callers decoupled from storage details.

pub mod book_service;
