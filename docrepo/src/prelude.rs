//! Convenient re-exports of commonly used types from docrepo.
//!
//! ```ignore
//! use docrepo::prelude::*;
//! ```
//!
//! This provides access to:
//! - Document and key traits
//! - The repository facade and eraser traits
//! - Filter construction
//! - Cancellation and error types

pub use docrepo_core::{
    cancel::Cancellation,
    document::{Document, DocumentExt, DocumentKey, HasKey, Uuid},
    eraser::{Eraser, EraserBuilder},
    query::{Expr, FieldOp, Filter, Predicate, QueryVisitor},
    repository::Repository,
    error::{RepositoryError, RepositoryResult},
};
pub use tokio_util::sync::CancellationToken;
