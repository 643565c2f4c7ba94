use crate::domain::Book;
use crate::error::{LibraryError, LibraryResult};
use crate::library::Library;
use sqlx::{Row, SqlitePool};

/// Persistence for [`Book`] records.
pub struct CatalogStore {
    pool: SqlitePool,
}

impl CatalogStore {
    pub fn new(library: &Library) -> Self {
        Self {
            pool: library.pool.clone(),
        }
    }

    /// Inserts a new book into the catalog.
    ///
    /// Titles are unique; inserting an existing title fails with
    /// `LibraryError::DuplicateBook`. Field validation happens in
    /// [`Book::new`], before a record ever reaches the store.
    pub async fn add_book(&self, book: &Book) -> LibraryResult<()> {
        let result = sqlx::query(
            "INSERT INTO books (title, author, genre, quantity)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.quantity)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(LibraryError::DuplicateBook(book.title.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Looks up a book by title, returning `None` when absent.
    pub async fn find_book(&self, title: &str) -> LibraryResult<Option<Book>> {
        let row = sqlx::query("SELECT title, author, genre, quantity FROM books WHERE title = ?")
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Book {
            title: row.get(0),
            author: row.get(1),
            genre: row.get(2),
            quantity: row.get(3),
        }))
    }

    /// Lists every book in the catalog, in insertion order.
    pub async fn list_books(&self) -> LibraryResult<Vec<Book>> {
        let rows =
            sqlx::query("SELECT title, author, genre, quantity FROM books ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        let books = rows
            .iter()
            .map(|row| Book {
                title: row.get(0),
                author: row.get(1),
                genre: row.get(2),
                quantity: row.get(3),
            })
            .collect();

        Ok(books)
    }

    /// Removes a book from the catalog.
    ///
    /// Returns `LibraryError::BookNotFound` if no row matched. Outstanding
    /// loans are not touched; callers that care use
    /// `CirculationService::remove_book`.
    pub async fn delete_book(&self, title: &str) -> LibraryResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE title = ?")
            .bind(title)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LibraryError::BookNotFound(title.to_owned()));
        }

        Ok(())
    }

    /// Applies `quantity += delta` to one book as a single statement.
    ///
    /// Returns `LibraryError::BookNotFound` if no row matched. A delta that
    /// would drive the count negative trips the schema's `CHECK` constraint
    /// and surfaces as `LibraryError::Db`; use
    /// [`try_adjust_quantity`](Self::try_adjust_quantity) when the floor
    /// must be a normal outcome rather than an error.
    pub async fn adjust_quantity(&self, title: &str, delta: i64) -> LibraryResult<()> {
        let result = sqlx::query(
            "UPDATE books
             SET quantity = quantity + ?, updated_at = CURRENT_TIMESTAMP
             WHERE title = ?",
        )
        .bind(delta)
        .bind(title)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LibraryError::BookNotFound(title.to_owned()));
        }

        Ok(())
    }

    /// Conditional variant of [`adjust_quantity`](Self::adjust_quantity).
    ///
    /// The update only applies when the resulting quantity stays at or
    /// above zero; the guard and the write are one statement, so concurrent
    /// decrements on the same title cannot both pass a last-copy check.
    /// Returns `false` when the guard rejected or no row matched.
    pub async fn try_adjust_quantity(&self, title: &str, delta: i64) -> LibraryResult<bool> {
        let result = sqlx::query(
            "UPDATE books
             SET quantity = quantity + ?, updated_at = CURRENT_TIMESTAMP
             WHERE title = ? AND quantity + ? >= 0",
        )
        .bind(delta)
        .bind(title)
        .bind(delta)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
