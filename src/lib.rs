//! # stacks_core
//!
//! A Rust library implementing the circulation engine of a small lending
//! library: a SQLite-backed catalog of books and the transactional rules
//! that keep each book's available-copy count consistent with its
//! outstanding loans.
//!
//! ## Features
//!
//! - **Catalog Management**: Create, look up, list, and delete books with
//!   an enforced-unique title
//! - **Circulation**: Lend copies to borrowers, take returns, amend return
//!   dates, and write off lost copies
//! - **Atomic Quantity Accounting**: A store-native guarded decrement keeps
//!   `quantity >= 0` even under concurrent lending sessions
//! - **Eager Validation**: Bad input fails before any state changes
//! - **Robust Error Handling**: Typed errors with automatic conversions
//! - **Recoverable Startup**: Optional reconnect/backoff when the database
//!   is briefly unavailable
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stacks_core::library::Library;
//! use stacks_core::service::CirculationService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), stacks_core::LibraryError> {
//! let library = Library::connect(std::path::Path::new("library.db")).await?;
//! let service = CirculationService::new(&library);
//!
//! service.add_book("Dune", "Herbert", "Sci-Fi", 3).await?;
//! service.lend_book("Dune", "Alice", "2024-01-01", "2024-01-15").await?;
//!
//! // Render current state however the caller likes
//! for book in service.catalog().list_books().await? {
//!     println!("{} — {} copies on the shelf", book.title, book.quantity);
//! }
//!
//! service.return_book("Dune", "Alice").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`domain`]**: `Book` and `LendingRecord` entities with field and
//!   date validation
//! - **[`library`]**: database connection, schema bootstrap, and the
//!   reconnect loop
//! - **[`catalog`]**: persistence for books, including the atomic
//!   quantity-adjustment primitives
//! - **[`circulation`]**: persistence for lending records
//! - **[`service`]**: the transactional core composing both stores
//! - **[`error`]**: unified error handling throughout the library
//!
//! ## Circulation Rules
//!
//! A loan is created by `lend_book`, which decrements the book's quantity
//! under a zero-floor guard (one conditional SQL statement, so two
//! sessions can never both take the last copy). A loan ends one of two
//! ways:
//!
//! - `return_book` deletes the record and puts the copy back on the shelf
//!   (quantity +1)
//! - `write_off` deletes the record and leaves the quantity alone — the
//!   copy is considered lost
//!
//! Both compound operations compensate on partial failure, so a reader
//! never observes a decrement without its loan or vice versa.
//!
//! ## Error Handling
//!
//! All operations return [`LibraryResult<T>`] which wraps the unified
//! [`LibraryError`] type. Validation errors convert automatically from the
//! domain layer, allowing the use of the `?` operator throughout.
//!
//! ```rust,no_run
//! use stacks_core::{LibraryError, LibraryResult};
//! use stacks_core::domain::Book;
//!
//! fn build_book_safely() -> LibraryResult<Book> {
//!     // This will automatically convert any DomainError to LibraryError
//!     let book = Book::new("Dune", "Herbert", "Sci-Fi", 3)?;
//!     Ok(book)
//! }
//! ```

pub mod catalog;
pub mod circulation;
pub mod domain;
pub mod error;
pub mod library;
pub mod service;

/// Re-exports the most commonly used types for convenience.
pub use error::{LibraryError, LibraryResult};
