use crate::error::{LibraryError, LibraryResult};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Connection handle for one library database.
///
/// Wraps a [`SqlitePool`] shared by the catalog and circulation stores.
/// Cloning is cheap; all clones talk to the same database.
#[derive(Clone)]
pub struct Library {
    pub(crate) pool: SqlitePool,
}

impl Library {
    /// Opens (creating if necessary) the library database at `db_path`
    /// and bootstraps the schema.
    ///
    /// Returns `LibraryError::Db` if the database cannot be opened or the
    /// schema statements fail.
    pub async fn connect(db_path: &Path) -> LibraryResult<Self> {
        let connection_path = format!("sqlite:{}?mode=rwc", db_path.display());

        let pool = SqlitePool::connect(&connection_path).await?;
        Self::init_schema(&pool).await?;

        Ok(Library { pool })
    }

    /// Like [`connect`](Self::connect), but retries on failure.
    ///
    /// Makes up to `attempts` connection attempts with a fixed `delay`
    /// between them, so a store that is briefly unavailable at startup does
    /// not abort the whole session. The final failure is reported as
    /// `LibraryError::Connection`.
    pub async fn connect_with_retry(
        db_path: &Path,
        attempts: u32,
        delay: Duration,
    ) -> LibraryResult<Self> {
        let attempts = attempts.max(1);
        let mut last_error = String::from("no connection attempts made");

        for attempt in 1..=attempts {
            match Self::connect(db_path).await {
                Ok(library) => return Ok(library),
                Err(e) => {
                    tracing::warn!(attempt, attempts, error = %e, "library connection failed");
                    last_error = e.to_string();
                }
            }

            if attempt < attempts {
                tokio::time::sleep(delay).await;
            }
        }

        Err(LibraryError::Connection(last_error))
    }

    /// Resolves the default per-user database location,
    /// `{data_dir}/stacks/library.db`.
    ///
    /// The parent directory is not created here; callers that use the
    /// default path are expected to `fs::create_dir_all` it first.
    pub fn default_path() -> LibraryResult<PathBuf> {
        let data = dirs::data_dir()
            .ok_or_else(|| LibraryError::Other("user data directory not found".into()))?;

        Ok(data.join("stacks").join("library.db"))
    }

    async fn init_schema(pool: &SqlitePool) -> LibraryResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT UNIQUE NOT NULL,
                author TEXT NOT NULL,
                genre TEXT NOT NULL,
                quantity INTEGER NOT NULL CHECK (quantity >= 0),
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS lending_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                book_title TEXT NOT NULL,
                borrower_name TEXT NOT NULL,
                borrow_date TEXT NOT NULL,
                return_date TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (book_title, borrower_name)
            )",
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
