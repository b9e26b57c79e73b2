//! Core traits for document representation and identification.
//!
//! Documents come in two flavours which share one capability trait, [`HasKey`]:
//!
//! - **Implicitly keyed** documents carry a driver-assigned [`Uuid`] and implement
//!   `HasKey<Uuid>`.
//! - **Explicitly keyed** documents declare their own key type, e.g. `HasKey<i32>`.
//!
//! Repository operations are generic over both the document type `T` and its key
//! type `K`, bound by `T: HasKey<K>`, so a document type can never be erased with
//! a key type it does not declare.

use bson::{Bson, oid::ObjectId, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub use bson::Uuid;

use crate::error::RepositoryResult;

/// Core trait that all documents handled by a repository must implement.
///
/// # Example
///
/// ```ignore
/// use docrepo::document::{Document, HasKey, Uuid};
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct User {
///     pub id: Uuid,
///     pub name: String,
/// }
///
/// impl Document for User {
///     fn collection_name() -> &'static str {
///         "users"
///     }
/// }
///
/// impl HasKey<Uuid> for User {
///     fn key(&self) -> &Uuid {
///         &self.id
///     }
/// }
/// ```
pub trait Document: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns the name of the collection this document type belongs to.
    fn collection_name() -> &'static str;

    /// Returns the partition this particular document lives in, if any.
    ///
    /// Partitioned documents are stored in the collection returned by
    /// [`partitioned_collection_name`] rather than the bare collection name.
    fn partition_key(&self) -> Option<&str> {
        None
    }
}

/// Capability trait for documents identified by a key of type `K`.
///
/// Erasers that delete server side, such as the MongoDB eraser, match the key
/// against the stored `_id` field. Serialize the key field as `_id`
/// (`#[serde(rename = "_id")]`) for those erasers; the in-memory eraser looks
/// documents up by `key()` whatever the field is called.
pub trait HasKey<K: DocumentKey>: Document {
    /// Returns a reference to this document's key.
    fn key(&self) -> &K;
}

/// A type usable as a document key.
///
/// Keys are stored in the `_id` field of the underlying document.
pub trait DocumentKey: Debug + Clone + PartialEq + Send + Sync + 'static {
    /// Converts this key into the BSON value stored under `_id`.
    fn to_bson_key(&self) -> Bson;
}

impl DocumentKey for Uuid {
    fn to_bson_key(&self) -> Bson {
        Bson::from(*self)
    }
}

impl DocumentKey for uuid::Uuid {
    fn to_bson_key(&self) -> Bson {
        Bson::from(Uuid::from(*self))
    }
}

impl DocumentKey for ObjectId {
    fn to_bson_key(&self) -> Bson {
        Bson::ObjectId(*self)
    }
}

impl DocumentKey for i32 {
    fn to_bson_key(&self) -> Bson {
        Bson::Int32(*self)
    }
}

impl DocumentKey for i64 {
    fn to_bson_key(&self) -> Bson {
        Bson::Int64(*self)
    }
}

impl DocumentKey for String {
    fn to_bson_key(&self) -> Bson {
        Bson::String(self.clone())
    }
}

/// Extension trait providing serialization utilities for documents.
///
/// Automatically implemented for all types that implement [`Document`].
pub trait DocumentExt: Document {
    /// Converts this document to a BSON value for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_bson(&self) -> RepositoryResult<Bson>;

    /// Returns the collection this document is stored in, taking its own
    /// partition into account.
    fn resolved_collection(&self) -> String;
}

impl<D: Document> DocumentExt for D {
    fn to_bson(&self) -> RepositoryResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    fn resolved_collection(&self) -> String {
        partitioned_collection_name::<D>(self.partition_key())
    }
}

/// Resolves the collection name for document type `D` within an optional partition.
///
/// An absent partition yields the bare collection name; a partition `p` yields
/// `"{p}-{collection}"`.
pub fn partitioned_collection_name<D: Document>(partition_key: Option<&str>) -> String {
    match partition_key {
        Some(partition) => format!("{}-{}", partition, D::collection_name()),
        None => D::collection_name().to_string(),
    }
}

/// Groups documents by the collection they resolve to, preserving first-seen order.
pub fn group_by_collection<T: Document>(documents: Vec<T>) -> Vec<(String, Vec<T>)> {
    let mut groups: Vec<(String, Vec<T>)> = Vec::new();

    for document in documents {
        let collection = document.resolved_collection();

        match groups.iter_mut().find(|(name, _)| *name == collection) {
            Some((_, group)) => group.push(document),
            None => groups.push((collection, vec![document])),
        }
    }

    groups
}
