use bookshelf_core::{
    Book, BookRepository, BookStore, DbError, RepoError, RepoResult, UnitOfWork,
};

const FIXTURE_TITLE: &str = "junit5";
const FIXTURE_AUTHOR: &str = "ijhwang01";

/// Inserts the fixture every scenario starts from.
fn seed_fixture(uow: &UnitOfWork<'_>) -> RepoResult<Book> {
    uow.books().save(&Book::new(FIXTURE_TITLE, FIXTURE_AUTHOR))
}

#[test]
fn save_assigns_new_identifier_and_keeps_fields() {
    let mut store = BookStore::open_in_memory().unwrap();

    store
        .rolled_back(|uow| -> RepoResult<()> {
            let book = Book::new("junit", "ijhwang");
            assert!(!book.is_persisted());

            let stored = uow.books().save(&book)?;
            assert_eq!(stored.title.as_deref(), Some("junit"));
            assert_eq!(stored.author.as_deref(), Some("ijhwang"));
            assert_eq!(stored.id(), Some(1));
            Ok(())
        })
        .unwrap();
}

#[test]
fn identifiers_keep_increasing_across_rolled_back_units() {
    let mut store = BookStore::open_in_memory().unwrap();

    for expected in 1..=3 {
        let id = store
            .rolled_back(|uow| seed_fixture(uow).map(|book| book.id()))
            .unwrap();
        assert_eq!(id, Some(expected));
    }
    assert!(store.books().find_all().unwrap().is_empty());

    let stored = store
        .books()
        .save(&Book::new(FIXTURE_TITLE, FIXTURE_AUTHOR))
        .unwrap();
    assert_eq!(stored.id(), Some(4));
    assert_eq!(stored.title.as_deref(), Some(FIXTURE_TITLE));
    assert_eq!(stored.author.as_deref(), Some(FIXTURE_AUTHOR));
}

#[test]
fn find_by_id_after_delete_returns_none() {
    let mut store = BookStore::open_in_memory().unwrap();
    store.reset_books_table().unwrap();

    store
        .rolled_back(|uow| -> RepoResult<()> {
            let seeded = seed_fixture(uow)?;
            assert_eq!(seeded.id(), Some(1));

            uow.books().delete_by_id(1)?;
            assert!(uow.books().find_by_id(1)?.is_none());
            Ok(())
        })
        .unwrap();
}

#[test]
fn save_with_existing_identifier_updates_in_place() {
    let mut store = BookStore::open_in_memory().unwrap();
    store.reset_books_table().unwrap();

    store
        .rolled_back(|uow| -> RepoResult<()> {
            seed_fixture(uow)?;

            let edited = Book::with_id(1, "junit5 수정", "ijhwang01 수정");
            let stored = uow.books().save(&edited)?;
            assert_eq!(stored.id(), Some(1));
            assert_eq!(stored.title.as_deref(), Some("junit5 수정"));
            assert_eq!(stored.author.as_deref(), Some("ijhwang01 수정"));

            assert_eq!(uow.books().find_all()?.len(), 1);
            Ok(())
        })
        .unwrap();
}

#[test]
fn ordered_suite_reproduces_sequence_behavior() {
    let mut store = BookStore::open_in_memory().unwrap();

    // register: fixture takes 1, the registered book takes 2.
    store
        .rolled_back(|uow| -> RepoResult<()> {
            seed_fixture(uow)?;
            let stored = uow.books().save(&Book::new("junit", "ijhwang"))?;
            assert_eq!(stored.id(), Some(2));
            Ok(())
        })
        .unwrap();

    // list: only this unit's fixture is visible, and it took 3.
    store
        .rolled_back(|uow| -> RepoResult<()> {
            seed_fixture(uow)?;
            let books = uow.books().find_all()?;
            assert_eq!(books.len(), 1);
            assert_eq!(books[0].id(), Some(3));
            assert_eq!(books[0].title.as_deref(), Some(FIXTURE_TITLE));
            assert_eq!(books[0].author.as_deref(), Some(FIXTURE_AUTHOR));
            Ok(())
        })
        .unwrap();

    // get without a reset: the fixture lands on 4, so id 1 misses.
    store
        .rolled_back(|uow| -> RepoResult<()> {
            let seeded = seed_fixture(uow)?;
            assert_eq!(seeded.id(), Some(4));
            assert!(uow.books().find_by_id(1)?.is_none());
            Ok(())
        })
        .unwrap();

    // get after a reset: the fixture is back on 1.
    store.reset_books_table().unwrap();
    store
        .rolled_back(|uow| -> RepoResult<()> {
            seed_fixture(uow)?;
            let found = uow.books().find_by_id(1)?.unwrap();
            assert_eq!(found.title.as_deref(), Some(FIXTURE_TITLE));
            assert_eq!(found.author.as_deref(), Some(FIXTURE_AUTHOR));
            Ok(())
        })
        .unwrap();
}

#[test]
fn delete_missing_identifier_is_not_an_error() {
    let store = BookStore::open_in_memory().unwrap();
    let repo = store.books();

    repo.delete_by_id(404).unwrap();
    assert!(repo.find_by_id(404).unwrap().is_none());
}

#[test]
fn find_all_returns_insertion_order_without_reusing_deleted_ids() {
    let store = BookStore::open_in_memory().unwrap();
    let repo = store.books();

    let first = repo.save(&Book::new("a", "x")).unwrap();
    let second = repo.save(&Book::new("b", "y")).unwrap();
    repo.delete_by_id(second.id().unwrap()).unwrap();
    let third = repo.save(&Book::new("c", "z")).unwrap();

    assert_eq!(third.id(), Some(3));
    let ids: Vec<_> = repo
        .find_all()
        .unwrap()
        .iter()
        .map(|book| book.id())
        .collect();
    assert_eq!(ids, vec![first.id(), third.id()]);
}

#[test]
fn save_with_unknown_identifier_inserts_and_advances_sequence() {
    let store = BookStore::open_in_memory().unwrap();
    let repo = store.books();

    let placed = repo.save(&Book::with_id(10, "placed", "by hand")).unwrap();
    assert_eq!(placed.id(), Some(10));

    let next = repo.save(&Book::new("next", "auto")).unwrap();
    assert_eq!(next.id(), Some(11));
}

#[test]
fn absent_fields_round_trip_as_absent() {
    let store = BookStore::open_in_memory().unwrap();
    let repo = store.books();

    let stored = repo.save(&Book::from_parts(None, None, None)).unwrap();
    let loaded = repo.find_by_id(stored.id().unwrap()).unwrap().unwrap();
    assert!(loaded.title.is_none());
    assert!(loaded.author.is_none());
}

#[test]
fn non_text_column_value_is_reported_as_invalid_data() {
    let store = BookStore::open_in_memory().unwrap();
    store
        .connection()
        .execute(
            "INSERT INTO books (id, title, author) VALUES (1, X'00FF', 'someone');",
            [],
        )
        .unwrap();

    let err = store.books().find_by_id(1).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("books.title")));
}

#[test]
fn identifiers_continue_after_reopening_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.sqlite3");

    {
        let store = BookStore::open(&path).unwrap();
        let repo = store.books();
        repo.save(&Book::new("a", "x")).unwrap();
        let second = repo.save(&Book::new("b", "y")).unwrap();
        repo.delete_by_id(second.id().unwrap()).unwrap();
    }

    let store = BookStore::open(&path).unwrap();
    assert_eq!(store.last_issued_id(), 2);
    let stored = store.books().save(&Book::new("c", "z")).unwrap();
    assert_eq!(stored.id(), Some(3));
}

#[test]
fn insert_after_highest_identifier_fails_without_wrapping() {
    let store = BookStore::open_in_memory().unwrap();
    let repo = store.books();

    let edge = repo.save(&Book::with_id(i64::MAX, "edge", "case")).unwrap();
    assert_eq!(edge.id(), Some(i64::MAX));

    let err = repo.save(&Book::new("next", "auto")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Db(DbError::SequenceExhausted { last_issued }) if last_issued == i64::MAX
    ));
    assert_eq!(store.last_issued_id(), i64::MAX);

    let ids: Vec<_> = repo
        .find_all()
        .unwrap()
        .iter()
        .map(|book| book.id())
        .collect();
    assert_eq!(ids, vec![Some(i64::MAX)]);
}

#[test]
fn rows_written_around_the_store_are_not_seen_by_the_sequence() {
    let store = BookStore::open_in_memory().unwrap();
    store
        .connection()
        .execute(
            "INSERT INTO books (id, title, author) VALUES (1, 'raw', 'write');",
            [],
        )
        .unwrap();

    let err = store.books().save(&Book::new("next", "auto")).unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::Sqlite(_))));
}
