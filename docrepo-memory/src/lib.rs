//! In-memory document eraser for docrepo.
//!
//! This crate provides a thread-safe, in-memory implementation of the `Eraser` trait.
//! Documents are held as BSON behind an async-aware read-write lock, which makes it a
//! good fit for development, tests, and embedding in small services.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Partition aware** - Documents land in the collection of their own partition
//! - **Filter deletes** - Evaluates the full `Expr` language against stored documents
//!
//! # Quick Start
//!
//! ```ignore
//! use docrepo::{Document, HasKey, Repository, Uuid, memory::InMemoryEraser};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct User {
//!     pub id: Uuid,
//!     pub name: String,
//! }
//!
//! impl Document for User {
//!     fn collection_name() -> &'static str { "users" }
//! }
//!
//! impl HasKey<Uuid> for User {
//!     fn key(&self) -> &Uuid { &self.id }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let eraser = InMemoryEraser::new();
//!     let user = User { id: Uuid::new(), name: "Alice".to_string() };
//!     eraser.insert(vec![user.clone()]).await?;
//!
//!     let repository = Repository::new(eraser);
//!     assert_eq!(repository.delete_many(vec![user]).await?, 1);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrepo_memory;

pub mod eraser;
mod evaluator;

pub use eraser::{InMemoryEraser, InMemoryEraserBuilder};
