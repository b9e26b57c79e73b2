//! A generic document repository facade that delegates erasure to a pluggable backend.
//!
//! This crate is the core of the docrepo project and provides:
//!
//! - **Document traits** ([`document`]) - Documents, key capabilities and partition naming
//! - **Filter expressions** ([`query`]) - Filter AST, typed predicates and visitor
//! - **Cancellation** ([`cancel`]) - Optional cooperative cancellation handles
//! - **Eraser abstraction** ([`eraser`]) - The collaborator that performs deletions
//! - **Repository facade** ([`repository`]) - Typed delete operations with resolved defaults
//! - **Error handling** ([`error`]) - Error enum and result alias
//!
//! # Example
//!
//! ```ignore
//! use docrepo::{Document, HasKey, Repository};
//! use bson::Uuid;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct User {
//!     pub id: Uuid,
//!     pub name: String,
//! }
//!
//! impl Document for User {
//!     fn collection_name() -> &'static str {
//!         "users"
//!     }
//! }
//!
//! impl HasKey<Uuid> for User {
//!     fn key(&self) -> &Uuid {
//!         &self.id
//!     }
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrepo_core;

pub mod cancel;
pub mod document;
pub mod eraser;
pub mod error;
pub mod query;
pub mod repository;
