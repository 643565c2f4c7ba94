use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error(transparent)]
    Domain(#[from] crate::domain::DomainError),

    #[error("book not found: {0}")]
    BookNotFound(String),

    #[error("loan not found: '{0}' borrowed by {1}")]
    LoanNotFound(String, String),

    #[error("book already in catalog: {0}")]
    DuplicateBook(String),

    #[error("loan already active: '{0}' borrowed by {1}")]
    DuplicateLoan(String, String),

    #[error("no copies of '{0}' available to lend")]
    OutOfStock(String),

    #[error("book '{0}' still has outstanding loans")]
    ActiveLoans(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Other error: {0}")]
    Other(String),
}

pub type LibraryResult<T> = Result<T, LibraryError>;
