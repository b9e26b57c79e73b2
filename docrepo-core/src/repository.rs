//! Typed repository facade over an [`Eraser`].
//!
//! [`Repository`] offers one explicitly named method per combination of optional
//! arguments. Each shorthand resolves the arguments it omits to fixed defaults and
//! forwards to the eraser exactly once:
//!
//! | omitted         | forwarded as             |
//! |-----------------|--------------------------|
//! | partition key   | `None` (unpartitioned)   |
//! | cancellation    | [`Cancellation::none()`] |
//!
//! The eraser's result, count or error, is returned unchanged.
//!
//! # Example
//!
//! ```ignore
//! use docrepo::prelude::*;
//! use docrepo::memory::InMemoryEraser;
//!
//! let repository = Repository::new(InMemoryEraser::new());
//!
//! let removed = repository
//!     .delete_many_matching(Predicate::<User>::new(Filter::eq("active", false)))
//!     .await?;
//! ```

use crate::{
    cancel::Cancellation,
    document::{DocumentKey, HasKey},
    eraser::Eraser,
    error::RepositoryResult,
    query::Predicate,
};

/// A strongly-typed repository bound to a specific eraser implementation.
///
/// The repository holds no state of its own besides the eraser, so it is safe to
/// share between tasks whenever the eraser is.
#[derive(Debug, Clone)]
pub struct Repository<E: Eraser> {
    eraser: E,
}

impl<E: Eraser> Repository<E> {
    /// Creates a new repository over the given eraser.
    pub fn new(eraser: E) -> Self {
        Self { eraser }
    }

    /// Returns a reference to the underlying eraser.
    pub fn eraser(&self) -> &E {
        &self.eraser
    }

    /// Consumes the repository, returning the underlying eraser.
    pub fn into_inner(self) -> E {
        self.eraser
    }

    /// Deletes a single document. Not cancellable.
    pub async fn delete_one<T, K>(&self, document: T) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.delete_one_cancellable::<T, K>(document, Cancellation::none())
            .await
    }

    /// Deletes a single document, forwarding `cancellation` to the eraser.
    pub async fn delete_one_cancellable<T, K>(
        &self,
        document: T,
        cancellation: impl Into<Cancellation>,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.eraser
            .delete_one::<T, K>(document, cancellation.into())
            .await
    }

    /// Deletes the first document matching `filter` in the unpartitioned collection.
    pub async fn delete_one_matching<T, K>(&self, filter: Predicate<T>) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.eraser
            .delete_one_matching::<T, K>(filter, None, Cancellation::none())
            .await
    }

    pub async fn delete_one_matching_cancellable<T, K>(
        &self,
        filter: Predicate<T>,
        cancellation: impl Into<Cancellation>,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.eraser
            .delete_one_matching::<T, K>(filter, None, cancellation.into())
            .await
    }

    pub async fn delete_one_matching_in<T, K>(
        &self,
        filter: Predicate<T>,
        partition_key: &str,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.eraser
            .delete_one_matching::<T, K>(filter, Some(partition_key), Cancellation::none())
            .await
    }

    pub async fn delete_one_matching_in_cancellable<T, K>(
        &self,
        filter: Predicate<T>,
        partition_key: &str,
        cancellation: impl Into<Cancellation>,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.eraser
            .delete_one_matching::<T, K>(filter, Some(partition_key), cancellation.into())
            .await
    }

    /// Deletes exactly the given documents. Not cancellable.
    ///
    /// # Returns
    ///
    /// The number of documents the eraser reports as removed.
    pub async fn delete_many<T, K>(&self, documents: Vec<T>) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.delete_many_cancellable::<T, K>(documents, Cancellation::none())
            .await
    }

    /// Deletes exactly the given documents, forwarding `cancellation` to the eraser.
    pub async fn delete_many_cancellable<T, K>(
        &self,
        documents: Vec<T>,
        cancellation: impl Into<Cancellation>,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.eraser
            .delete_many::<T, K>(documents, cancellation.into())
            .await
    }

    /// Deletes every document matching `filter` in the unpartitioned collection.
    /// Not cancellable.
    pub async fn delete_many_matching<T, K>(&self, filter: Predicate<T>) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.eraser
            .delete_many_matching::<T, K>(filter, None, Cancellation::none())
            .await
    }

    /// Deletes every document matching `filter` in the unpartitioned collection,
    /// forwarding `cancellation` to the eraser.
    pub async fn delete_many_matching_cancellable<T, K>(
        &self,
        filter: Predicate<T>,
        cancellation: impl Into<Cancellation>,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.eraser
            .delete_many_matching::<T, K>(filter, None, cancellation.into())
            .await
    }

    /// Deletes every document matching `filter` within `partition_key`. Not cancellable.
    pub async fn delete_many_matching_in<T, K>(
        &self,
        filter: Predicate<T>,
        partition_key: &str,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.eraser
            .delete_many_matching::<T, K>(filter, Some(partition_key), Cancellation::none())
            .await
    }

    /// Deletes every document matching `filter` within `partition_key`, forwarding
    /// `cancellation` to the eraser.
    pub async fn delete_many_matching_in_cancellable<T, K>(
        &self,
        filter: Predicate<T>,
        partition_key: &str,
        cancellation: impl Into<Cancellation>,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.eraser
            .delete_many_matching::<T, K>(filter, Some(partition_key), cancellation.into())
            .await
    }
}
