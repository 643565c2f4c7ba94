use crate::catalog::CatalogStore;
use crate::circulation::CirculationStore;
use crate::domain::{self, Book, DomainError, LendingRecord};
use crate::error::{LibraryError, LibraryResult};
use crate::library::Library;

/// Tunable rules applied by [`CirculationService`] before any mutation.
#[derive(Debug, Clone)]
pub struct LendPolicy {
    /// When set, `lend_book` rejects a return date earlier than the
    /// borrow date. Off by default: the historical behavior accepts any
    /// pair of well-formed dates.
    pub enforce_date_order: bool,
}

impl Default for LendPolicy {
    fn default() -> Self {
        Self {
            enforce_date_order: false,
        }
    }
}

/// Orchestrates the catalog and circulation stores.
///
/// All cross-entity mutations go through here: validation runs before any
/// write, and the two-step operations (`lend_book`, `return_book`) either
/// apply both effects or compensate so neither sticks.
pub struct CirculationService {
    catalog: CatalogStore,
    circulation: CirculationStore,
    policy: LendPolicy,
}

impl CirculationService {
    pub fn new(library: &Library) -> Self {
        Self::with_policy(library, LendPolicy::default())
    }

    pub fn with_policy(library: &Library, policy: LendPolicy) -> Self {
        Self {
            catalog: CatalogStore::new(library),
            circulation: CirculationStore::new(library),
            policy,
        }
    }

    /// Read access to the underlying catalog store, for display queries.
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Read access to the underlying circulation store, for display queries.
    pub fn circulation(&self) -> &CirculationStore {
        &self.circulation
    }

    /// Validates and inserts a new book.
    ///
    /// Fails with `DomainError` on an empty field or non-positive
    /// quantity, and `LibraryError::DuplicateBook` on a title already in
    /// the catalog.
    pub async fn add_book(
        &self,
        title: &str,
        author: &str,
        genre: &str,
        quantity: i64,
    ) -> LibraryResult<()> {
        let book = Book::new(title, author, genre, quantity)?;
        self.catalog.add_book(&book).await?;

        tracing::info!(title = %book.title, quantity, "book added to catalog");
        Ok(())
    }

    /// Removes a book, refusing while any of its loans are outstanding.
    ///
    /// Fails with `LibraryError::ActiveLoans` if the title still has
    /// loans, or `LibraryError::BookNotFound` if it is not in the catalog.
    pub async fn remove_book(&self, title: &str) -> LibraryResult<()> {
        let outstanding = self.circulation.count_loans_for(title).await?;
        if outstanding > 0 {
            return Err(LibraryError::ActiveLoans(title.to_owned()));
        }

        self.catalog.delete_book(title).await?;

        tracing::info!(title, "book removed from catalog");
        Ok(())
    }

    /// Lends one copy of a book to a borrower.
    ///
    /// Validates every field up front, then decrements the book's
    /// quantity with the zero-floor guard and inserts the loan record. If
    /// the insert fails after the decrement, the quantity is restored, so
    /// the operation is all-or-nothing.
    ///
    /// Fails with `DomainError` on bad input, `LibraryError::BookNotFound`
    /// if the title is not in the catalog, `LibraryError::OutOfStock` when
    /// no copies remain, and `LibraryError::DuplicateLoan` if the borrower
    /// already holds this title.
    pub async fn lend_book(
        &self,
        title: &str,
        borrower: &str,
        borrow_date: &str,
        return_date: &str,
    ) -> LibraryResult<()> {
        let record = LendingRecord::new(title, borrower, borrow_date, return_date)?;

        if self.policy.enforce_date_order && record.return_date < record.borrow_date {
            return Err(
                DomainError::ReturnBeforeBorrow(record.borrow_date, record.return_date).into(),
            );
        }

        if self.catalog.find_book(&record.book_title).await?.is_none() {
            return Err(LibraryError::BookNotFound(record.book_title));
        }

        // The guard, not the lookup above, decides out-of-stock; a racing
        // lender between the two calls only changes which error we report.
        if !self
            .catalog
            .try_adjust_quantity(&record.book_title, -1)
            .await?
        {
            return Err(LibraryError::OutOfStock(record.book_title));
        }

        if let Err(e) = self.circulation.create_loan(&record).await {
            tracing::warn!(
                title = %record.book_title,
                borrower = %record.borrower_name,
                error = %e,
                "loan insert failed, restoring quantity"
            );
            if let Err(restore) = self.catalog.adjust_quantity(&record.book_title, 1).await {
                tracing::error!(
                    title = %record.book_title,
                    error = %restore,
                    "could not restore quantity after aborted lend"
                );
            }
            return Err(e);
        }

        tracing::info!(
            title = %record.book_title,
            borrower = %record.borrower_name,
            "book lent"
        );
        Ok(())
    }

    /// Closes a loan and puts the copy back on the shelf.
    ///
    /// Deletes the loan record and increments the book's quantity by one.
    /// If the increment fails after the delete, the record is reinstated,
    /// so the operation is all-or-nothing.
    ///
    /// Fails with `LibraryError::LoanNotFound` if no such loan exists.
    pub async fn return_book(&self, title: &str, borrower: &str) -> LibraryResult<()> {
        let record = self
            .circulation
            .find_loan(title, borrower)
            .await?
            .ok_or_else(|| LibraryError::LoanNotFound(title.to_owned(), borrower.to_owned()))?;

        self.circulation.delete_loan(title, borrower).await?;

        if let Err(e) = self.catalog.adjust_quantity(title, 1).await {
            tracing::warn!(title, borrower, error = %e, "quantity restore failed, reinstating loan");
            if let Err(reinsert) = self.circulation.create_loan(&record).await {
                tracing::error!(
                    title,
                    error = %reinsert,
                    "could not reinstate loan after aborted return"
                );
            }
            return Err(e);
        }

        tracing::info!(title, borrower, "book returned");
        Ok(())
    }

    /// Sets a new return date on an outstanding loan.
    ///
    /// Validates the date, then delegates to the store. A missing loan is
    /// not an error; the returned `bool` says whether anything changed.
    pub async fn update_return(
        &self,
        title: &str,
        borrower: &str,
        new_date: &str,
    ) -> LibraryResult<bool> {
        let date = domain::parse_date(new_date)?;

        let updated = self
            .circulation
            .update_return_date(title, borrower, date)
            .await?;

        if updated {
            tracing::info!(title, borrower, %date, "return date updated");
        }
        Ok(updated)
    }

    /// Writes off a loan: the record is deleted but the quantity stays
    /// put, modeling a copy that never came back.
    ///
    /// Fails with `LibraryError::LoanNotFound` if no such loan exists.
    pub async fn write_off(&self, title: &str, borrower: &str) -> LibraryResult<()> {
        self.circulation.delete_loan(title, borrower).await?;

        tracing::info!(title, borrower, "loan written off, copy not restocked");
        Ok(())
    }
}
