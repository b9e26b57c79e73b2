//! MongoDB eraser for docrepo.
//!
//! This crate provides a MongoDB-based implementation of the `Eraser` trait. Filters
//! are translated into native MongoDB query documents and executed server side with
//! `deleteOne` / `deleteMany`.
//!
//! To use this eraser, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! docrepo = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Features
//!
//! - **Server-side filtering** - Filters run in MongoDB's query engine
//! - **Partition aware** - Partitioned collections are sanitized into valid namespaces
//! - **Cancellable** - In-flight deletes are abandoned when the token fires
//!
//! # Example
//!
//! ```ignore
//! use docrepo::{Repository, eraser::EraserBuilder, mongodb::MongoDbEraser};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let eraser = MongoDbEraser::builder("mongodb://localhost:27017", "my_database")
//!         .build()
//!         .await?;
//!     let repository = Repository::new(eraser);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrepo_mongodb;

pub mod eraser;
mod query;
mod sanitizer;

pub use eraser::{MongoDbEraser, MongoDbEraserBuilder};
