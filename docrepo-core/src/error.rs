//! Error types and result types for repository operations.
//!
//! Every fallible operation in the workspace returns [`RepositoryResult<T>`].
//! The repository facade never constructs these errors itself; they originate
//! in an [`Eraser`](crate::eraser::Eraser) implementation and are passed through
//! to the caller unchanged.

use bson::error::Error as BsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when erasing documents.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Serialization/deserialization error when converting a document to BSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during eraser initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A document with the given key already exists in the collection.
    /// The first argument is the document key, the second is the collection name.
    #[error("Document {0} already exists in collection {1}")]
    DocumentAlreadyExists(String, String),
    /// A stored value does not have the structure of a document.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// The filter expression cannot be evaluated or translated by the eraser.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    /// The operation observed a cancelled token and was aborted.
    #[error("Operation cancelled")]
    Cancelled,
    /// An error occurred in the underlying storage driver.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<BsonError> for RepositoryError {
    fn from(err: BsonError) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}
