//! Main docrepo crate providing a typed repository facade for deleting documents.
//!
//! This crate is the primary entry point for users of docrepo. It re-exports the core
//! types from the sub-crates and gives convenient access to the available erasers.
//!
//! # Features
//!
//! - **Typed deletes** - Delete by document set or by filter, for any key type
//! - **Partitions** - Scope filter deletes to a partitioned collection
//! - **Cancellation** - Forward a `CancellationToken` to the eraser
//! - **Multiple erasers** - In-memory and MongoDB implementations of one trait
//!
//! # Quick Start
//!
//! ```ignore
//! use docrepo::{prelude::*, memory::InMemoryEraser};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Session {
//!     pub id: Uuid,
//!     pub tenant: String,
//!     pub expired: bool,
//! }
//!
//! impl Document for Session {
//!     fn collection_name() -> &'static str { "sessions" }
//!     fn partition_key(&self) -> Option<&str> { Some(&self.tenant) }
//! }
//!
//! impl HasKey<Uuid> for Session {
//!     fn key(&self) -> &Uuid { &self.id }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let eraser = InMemoryEraser::builder().build().await.unwrap();
//!     let repository = Repository::new(eraser);
//!
//!     // Remove every expired session of one tenant
//!     let removed = repository
//!         .delete_many_matching_in(
//!             Predicate::<Session>::new(Filter::eq("expired", true)),
//!             "acme",
//!         )
//!         .await
//!         .unwrap();
//!
//!     println!("Removed {removed} sessions");
//! }
//! ```
//!
//! # Cancellation
//!
//! Every operation has a `_cancellable` form taking anything convertible into a
//! [`Cancellation`](cancel::Cancellation), such as a [`CancellationToken`]. The
//! plain forms forward [`Cancellation::none()`](cancel::Cancellation::none).
//!
//! ```ignore
//! let token = CancellationToken::new();
//!
//! let removed = repository
//!     .delete_many_cancellable(sessions, token.child_token())
//!     .await?;
//! ```
//!
//! # Erasers
//!
//! - [`memory`] - In-memory eraser for development and testing
//! - [`mongodb`] - MongoDB eraser (requires `mongodb` feature)

pub mod prelude;

pub use docrepo_core::{cancel, document, eraser, error, query, repository};
pub use docrepo_core::{
    document::{Document, HasKey, Uuid},
    repository::Repository,
};

// Re-export BSON types and the token type for convenience
pub use bson;
pub use tokio_util::sync::CancellationToken;

/// In-memory eraser implementations.
pub mod memory {
    pub use docrepo_memory::{InMemoryEraser, InMemoryEraserBuilder};
}

/// MongoDB eraser implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use docrepo_mongodb::{MongoDbEraser, MongoDbEraserBuilder};
}
