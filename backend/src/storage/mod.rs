//! # Storage Module
//!
//! SQLite persistence for student records.
//!
//! - **connection.rs** - pool setup and schema
//! - **student_repository.rs** - CRUD over the `students` table

pub mod connection;
pub mod student_repository;

pub use connection::DbConnection;
pub use student_repository::StudentRepository;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The unique roll number index rejected the write
    #[error("Roll number already exists")]
    DuplicateRollNumber,
    #[error("Invalid stored timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = error {
            if db_err.is_unique_violation() {
                return StorageError::DuplicateRollNumber;
            }
        }
        StorageError::Database(error)
    }
}
