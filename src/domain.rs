use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("quantity must be a positive number")]
    InvalidQuantity,
    #[error("invalid date '{0}': dates must be in YYYY-MM-DD format")]
    InvalidDate(String),
    #[error("return date {1} is before borrow date {0}")]
    ReturnBeforeBorrow(NaiveDate, NaiveDate),
}

/// A title held by the library, identified by its `title`.
///
/// `quantity` is the number of copies currently on the shelf, not the
/// total ever acquired; it drops by one for every outstanding loan.
#[derive(Debug, Clone)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub quantity: i64,
}

impl Book {
    /// Builds a catalog entry from raw field values.
    ///
    /// Trims each text field and rejects empty ones, and requires a
    /// strictly positive quantity: a book enters the catalog with at
    /// least one copy, only lending may drive the count to zero.
    ///
    /// Returns `DomainError::EmptyField` or `DomainError::InvalidQuantity`.
    pub fn new(title: &str, author: &str, genre: &str, quantity: i64) -> Result<Book, DomainError> {
        let title = required("title", title)?;
        let author = required("author", author)?;
        let genre = required("genre", genre)?;

        if quantity <= 0 {
            return Err(DomainError::InvalidQuantity);
        }

        Ok(Book {
            title,
            author,
            genre,
            quantity,
        })
    }
}

/// One outstanding loan of a single copy.
///
/// References its [`Book`] weakly, by title; the `(book_title,
/// borrower_name)` pair is the loan's identity.
#[derive(Debug, Clone)]
pub struct LendingRecord {
    pub book_title: String,
    pub borrower_name: String,
    pub borrow_date: NaiveDate,
    pub return_date: NaiveDate,
}

impl LendingRecord {
    /// Builds a loan record from raw field values.
    ///
    /// Trims and rejects empty text fields, and parses both dates as ISO
    /// calendar dates. No ordering between the two dates is imposed here;
    /// see `LendPolicy` for the opt-in check.
    ///
    /// Returns `DomainError::EmptyField` or `DomainError::InvalidDate`.
    pub fn new(
        book_title: &str,
        borrower_name: &str,
        borrow_date: &str,
        return_date: &str,
    ) -> Result<LendingRecord, DomainError> {
        let book_title = required("book title", book_title)?;
        let borrower_name = required("borrower name", borrower_name)?;
        let borrow_date = parse_date(borrow_date)?;
        let return_date = parse_date(return_date)?;

        Ok(LendingRecord {
            book_title,
            borrower_name,
            borrow_date,
            return_date,
        })
    }
}

/// Parses a `YYYY-MM-DD` date string.
///
/// Any other shape (wrong separator, missing parts, out-of-range day)
/// fails with `DomainError::InvalidDate`.
pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(value.to_owned()))
}

/// Validates a required text field, returning the trimmed value.
fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(DomainError::EmptyField(field));
    }

    Ok(trimmed.to_owned())
}
