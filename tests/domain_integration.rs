use stacks_core::domain::{Book, DomainError, LendingRecord, parse_date};

#[test]
fn build_valid_book() -> Result<(), DomainError> {
    let book = Book::new("Dune", "Herbert", "Sci-Fi", 3)?;

    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Herbert");
    assert_eq!(book.genre, "Sci-Fi");
    assert_eq!(book.quantity, 3);

    Ok(())
}

#[test]
fn book_fields_are_trimmed() -> Result<(), DomainError> {
    let book = Book::new("  Dune  ", " Herbert", "Sci-Fi ", 1)?;

    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Herbert");

    Ok(())
}

#[test]
fn empty_book_field_is_rejected() {
    let result = Book::new("", "Herbert", "Sci-Fi", 3);
    assert!(matches!(result, Err(DomainError::EmptyField("title"))));

    let result = Book::new("Dune", "   ", "Sci-Fi", 3);
    assert!(matches!(result, Err(DomainError::EmptyField("author"))));
}

#[test]
fn non_positive_quantity_is_rejected() {
    assert!(matches!(
        Book::new("Dune", "Herbert", "Sci-Fi", 0),
        Err(DomainError::InvalidQuantity)
    ));
    assert!(matches!(
        Book::new("Dune", "Herbert", "Sci-Fi", -2),
        Err(DomainError::InvalidQuantity)
    ));
}

#[test]
fn build_valid_lending_record() -> Result<(), DomainError> {
    let record = LendingRecord::new("Dune", "Alice", "2024-01-01", "2024-01-15")?;

    assert_eq!(record.book_title, "Dune");
    assert_eq!(record.borrower_name, "Alice");
    assert_eq!(record.borrow_date.to_string(), "2024-01-01");
    assert_eq!(record.return_date.to_string(), "2024-01-15");

    Ok(())
}

#[test]
fn wrong_date_separator_is_rejected() {
    let result = LendingRecord::new("Dune", "Alice", "2024/01/01", "2024-01-15");
    assert!(matches!(result, Err(DomainError::InvalidDate(_))));

    let result = LendingRecord::new("Dune", "Alice", "2024-01-01", "15-01-2024");
    assert!(matches!(result, Err(DomainError::InvalidDate(_))));
}

#[test]
fn empty_loan_field_is_rejected() {
    let result = LendingRecord::new("", "Alice", "2024-01-01", "2024-01-15");
    assert!(matches!(result, Err(DomainError::EmptyField("book title"))));

    let result = LendingRecord::new("Dune", "", "2024-01-01", "2024-01-15");
    assert!(matches!(
        result,
        Err(DomainError::EmptyField("borrower name"))
    ));
}

#[test]
fn parse_date_accepts_iso_and_rejects_junk() {
    assert!(parse_date("2024-02-29").is_ok()); // leap day
    assert!(parse_date(" 2024-01-01 ").is_ok());

    assert!(parse_date("2023-02-29").is_err()); // not a leap year
    assert!(parse_date("January 1st").is_err());
    assert!(parse_date("").is_err());
}
