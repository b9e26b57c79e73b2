//! Erasure backend abstraction for the repository.
//!
//! The [`Eraser`] trait is the only collaborator of the
//! [`Repository`](crate::repository::Repository) facade. Implementations perform the
//! actual bulk deletion against a store and report how many documents were removed.
//!
//! # Contract
//!
//! - Filters are opaque to the facade; the eraser evaluates or translates them.
//! - A partition key `p` scopes the operation to the collection
//!   `"{p}-{collection}"`, see [`partitioned_collection_name`](crate::document::partitioned_collection_name).
//!   Document-set deletes use each document's own [`partition_key`](crate::document::Document::partition_key).
//! - Cancellation is the eraser's responsibility. A token observed as cancelled
//!   results in [`RepositoryError::Cancelled`](crate::error::RepositoryError::Cancelled);
//!   no partial-completion guarantee is made.
//! - An empty document set deletes nothing and returns `0`.

use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{
    cancel::Cancellation,
    document::{DocumentKey, HasKey},
    error::RepositoryResult,
    query::Predicate,
};

/// Abstract interface for document erasers.
///
/// All implementations must be thread-safe and support concurrent calls from
/// multiple async tasks.
#[async_trait]
pub trait Eraser: Send + Sync + Debug {
    /// Deletes a single document, identified by its key.
    ///
    /// # Returns
    ///
    /// The number of documents removed (`0` or `1`).
    async fn delete_one<T, K>(
        &self,
        document: T,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey;

    /// Deletes the first document matching `filter` within the given partition.
    ///
    /// # Returns
    ///
    /// The number of documents removed (`0` or `1`).
    async fn delete_one_matching<T, K>(
        &self,
        filter: Predicate<T>,
        partition_key: Option<&str>,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey;

    /// Deletes exactly the given documents, identified by their keys.
    ///
    /// # Returns
    ///
    /// The number of documents removed.
    async fn delete_many<T, K>(
        &self,
        documents: Vec<T>,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey;

    /// Deletes every document matching `filter` within the given partition.
    ///
    /// A `partition_key` of `None` targets the unpartitioned collection.
    ///
    /// # Returns
    ///
    /// The number of documents removed.
    async fn delete_many_matching<T, K>(
        &self,
        filter: Predicate<T>,
        partition_key: Option<&str>,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey;
}

#[async_trait]
impl<E> Eraser for &E
where
    E: Eraser,
{
    async fn delete_one<T, K>(
        &self,
        document: T,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        (*self)
            .delete_one::<T, K>(document, cancellation)
            .await
    }

    async fn delete_one_matching<T, K>(
        &self,
        filter: Predicate<T>,
        partition_key: Option<&str>,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        (*self)
            .delete_one_matching::<T, K>(filter, partition_key, cancellation)
            .await
    }

    async fn delete_many<T, K>(
        &self,
        documents: Vec<T>,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        (*self)
            .delete_many::<T, K>(documents, cancellation)
            .await
    }

    async fn delete_many_matching<T, K>(
        &self,
        filter: Predicate<T>,
        partition_key: Option<&str>,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        (*self)
            .delete_many_matching::<T, K>(filter, partition_key, cancellation)
            .await
    }
}

#[async_trait]
impl<E> Eraser for Arc<E>
where
    E: Eraser,
{
    async fn delete_one<T, K>(
        &self,
        document: T,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        (**self)
            .delete_one::<T, K>(document, cancellation)
            .await
    }

    async fn delete_one_matching<T, K>(
        &self,
        filter: Predicate<T>,
        partition_key: Option<&str>,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        (**self)
            .delete_one_matching::<T, K>(filter, partition_key, cancellation)
            .await
    }

    async fn delete_many<T, K>(
        &self,
        documents: Vec<T>,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        (**self)
            .delete_many::<T, K>(documents, cancellation)
            .await
    }

    async fn delete_many_matching<T, K>(
        &self,
        filter: Predicate<T>,
        partition_key: Option<&str>,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        (**self)
            .delete_many_matching::<T, K>(filter, partition_key, cancellation)
            .await
    }
}

/// Factory for eraser instances, typically holding connection settings.
#[async_trait]
pub trait EraserBuilder {
    type Eraser: Eraser;

    async fn build(self) -> RepositoryResult<Self::Eraser>;
}
