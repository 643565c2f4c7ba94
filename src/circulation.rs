use crate::domain::{self, LendingRecord};
use crate::error::{LibraryError, LibraryResult};
use crate::library::Library;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Persistence for [`LendingRecord`]s.
///
/// Dates are stored as `YYYY-MM-DD` text and parsed back into
/// [`NaiveDate`] on read.
pub struct CirculationStore {
    pool: SqlitePool,
}

impl CirculationStore {
    pub fn new(library: &Library) -> Self {
        Self {
            pool: library.pool.clone(),
        }
    }

    /// Inserts a loan record.
    ///
    /// A borrower holds at most one outstanding loan per title; inserting
    /// the same `(book_title, borrower_name)` pair again fails with
    /// `LibraryError::DuplicateLoan`.
    pub async fn create_loan(&self, record: &LendingRecord) -> LibraryResult<()> {
        let result = sqlx::query(
            "INSERT INTO lending_records (book_title, borrower_name, borrow_date, return_date)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&record.book_title)
        .bind(&record.borrower_name)
        .bind(record.borrow_date.to_string())
        .bind(record.return_date.to_string())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(LibraryError::DuplicateLoan(
                    record.book_title.clone(),
                    record.borrower_name.clone(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Lists every outstanding loan, in insertion order.
    pub async fn list_loans(&self) -> LibraryResult<Vec<LendingRecord>> {
        let rows = sqlx::query(
            "SELECT book_title, borrower_name, borrow_date, return_date
             FROM lending_records ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    /// Looks up a loan by its `(book_title, borrower_name)` key,
    /// returning `None` when absent.
    pub async fn find_loan(
        &self,
        book_title: &str,
        borrower_name: &str,
    ) -> LibraryResult<Option<LendingRecord>> {
        let row = sqlx::query(
            "SELECT book_title, borrower_name, borrow_date, return_date
             FROM lending_records
             WHERE book_title = ? AND borrower_name = ?",
        )
        .bind(book_title)
        .bind(borrower_name)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(record_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Sets a new return date on one loan.
    ///
    /// Returns `false` when no record matched: updating a missing loan is
    /// not an error, just a no-op the caller can observe.
    pub async fn update_return_date(
        &self,
        book_title: &str,
        borrower_name: &str,
        new_date: NaiveDate,
    ) -> LibraryResult<bool> {
        let result = sqlx::query(
            "UPDATE lending_records SET return_date = ?
             WHERE book_title = ? AND borrower_name = ?",
        )
        .bind(new_date.to_string())
        .bind(book_title)
        .bind(borrower_name)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes a loan record.
    ///
    /// Returns `LibraryError::LoanNotFound` if no row matched.
    pub async fn delete_loan(&self, book_title: &str, borrower_name: &str) -> LibraryResult<()> {
        let result = sqlx::query(
            "DELETE FROM lending_records WHERE book_title = ? AND borrower_name = ?",
        )
        .bind(book_title)
        .bind(borrower_name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LibraryError::LoanNotFound(
                book_title.to_owned(),
                borrower_name.to_owned(),
            ));
        }

        Ok(())
    }

    /// Counts outstanding loans for one title.
    pub async fn count_loans_for(&self, book_title: &str) -> LibraryResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) FROM lending_records WHERE book_title = ?")
            .bind(book_title)
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.get(0);
        Ok(count)
    }
}

fn record_from_row(row: &SqliteRow) -> LibraryResult<LendingRecord> {
    let borrow_date: String = row.get(2);
    let return_date: String = row.get(3);

    Ok(LendingRecord {
        book_title: row.get(0),
        borrower_name: row.get(1),
        borrow_date: domain::parse_date(&borrow_date)
            .map_err(|e| LibraryError::Other(format!("stored borrow date unreadable: {e}")))?,
        return_date: domain::parse_date(&return_date)
            .map_err(|e| LibraryError::Other(format!("stored return date unreadable: {e}")))?,
    })
}
