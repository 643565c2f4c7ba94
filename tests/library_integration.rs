use stacks_core::catalog::CatalogStore;
use stacks_core::domain::Book;
use stacks_core::error::LibraryError;
use stacks_core::library::Library;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn connect_creates_database_and_schema() -> Result<(), LibraryError> {
    let tmpdir = TempDir::new().unwrap();
    let db_path = tmpdir.path().join("library.db");

    let library = Library::connect(&db_path).await?;
    assert!(db_path.exists());

    // Schema is usable straight away
    let catalog = CatalogStore::new(&library);
    let book = Book::new("Dune", "Herbert", "Sci-Fi", 3)?;
    catalog.add_book(&book).await?;

    Ok(())
}

#[tokio::test]
async fn connect_is_idempotent_across_sessions() -> Result<(), LibraryError> {
    let tmpdir = TempDir::new().unwrap();
    let db_path = tmpdir.path().join("library.db");

    let first = Library::connect(&db_path).await?;
    let catalog = CatalogStore::new(&first);
    catalog
        .add_book(&Book::new("Dune", "Herbert", "Sci-Fi", 3)?)
        .await?;

    // A second connect must not clobber existing data
    let second = Library::connect(&db_path).await?;
    let catalog = CatalogStore::new(&second);
    let found = catalog.find_book("Dune").await?;
    assert!(found.is_some());

    Ok(())
}

#[tokio::test]
async fn retry_reports_connection_error_when_exhausted() {
    let tmpdir = TempDir::new().unwrap();
    // SQLite will not create parent directories, so this can never connect
    let db_path = tmpdir.path().join("missing").join("library.db");

    let result = Library::connect_with_retry(&db_path, 2, Duration::from_millis(10)).await;

    assert!(matches!(result, Err(LibraryError::Connection(_))));
}

#[tokio::test]
async fn retry_succeeds_on_a_reachable_path() -> Result<(), LibraryError> {
    let tmpdir = TempDir::new().unwrap();
    let db_path = tmpdir.path().join("library.db");

    let library = Library::connect_with_retry(&db_path, 3, Duration::from_millis(10)).await?;

    let catalog = CatalogStore::new(&library);
    assert!(catalog.list_books().await?.is_empty());

    Ok(())
}

#[test]
fn default_path_points_into_user_data_dir() {
    // Only assert shape; the data dir may not exist on stripped-down CI
    if let Ok(path) = Library::default_path() {
        assert!(path.ends_with("stacks/library.db"));
    }
}
