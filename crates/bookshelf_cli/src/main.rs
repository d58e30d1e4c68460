//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `bookshelf_core` linkage, configuration and logging wiring.
//! - Walk one register/list/update/delete lifecycle and print JSON responses.

use bookshelf_core::{
    init_logging_from_config, BookSaveRequest, BookService, BookStore, CoreConfig,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bookshelf_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    let config = CoreConfig::from_env()?;
    let logging_enabled = init_logging_from_config(&config)?;

    println!("bookshelf_core ping={}", bookshelf_core::ping());
    println!("bookshelf_core version={}", bookshelf_core::core_version());
    println!("logging enabled={logging_enabled} level={}", config.log_level);

    let store = match &config.db_path {
        Some(path) => BookStore::open(path)?,
        None => BookStore::open_in_memory()?,
    };
    let service = BookService::new(store.books());

    let created = service.register(&BookSaveRequest::new("junit", "ijhwang"))?;
    println!("registered {}", serde_json::to_string(&created)?);

    let updated = service.update(created.id(), &BookSaveRequest::new("junit5", "ijhwang01"))?;
    println!("updated {}", serde_json::to_string(&updated)?);

    println!("listed {}", serde_json::to_string(&service.list()?)?);

    service.delete(created.id())?;
    println!(
        "deleted id={} present={}",
        created.id(),
        service.get(created.id())?.is_some()
    );
    log::info!(
        "event=cli_smoke module=cli status=ok last_issued_id={}",
        store.last_issued_id()
    );
    Ok(())
}
