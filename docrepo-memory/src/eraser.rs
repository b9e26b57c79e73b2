//! In-memory eraser implementation.
//!
//! Documents are kept as BSON values in nested HashMaps guarded by an async-aware
//! read-write lock: collection name → rendered key → document.

use std::{collections::HashMap, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use bson::Bson;
use tracing::debug;

use docrepo_core::{
    cancel::Cancellation,
    document::{DocumentExt, DocumentKey, HasKey, group_by_collection, partitioned_collection_name},
    eraser::{Eraser, EraserBuilder},
    error::{RepositoryError, RepositoryResult},
    query::{Expr, Predicate},
};

use crate::evaluator::DocumentEvaluator;

type CollectionMap = HashMap<String, Bson>;
type StoreMap = HashMap<String, CollectionMap>;


/// Thread-safe in-memory eraser.
///
/// `InMemoryEraser` is cloneable and uses an `Arc`-wrapped internal state, so
/// clones share the same underlying data. Besides the [`Eraser`] operations it
/// exposes [`insert`](InMemoryEraser::insert) for seeding and a few inspection
/// helpers.
///
/// Filter deletes scan every document in the target collection.
///
/// # Example
///
/// ```ignore
/// use docrepo_memory::InMemoryEraser;
///
/// let eraser = InMemoryEraser::new();
/// eraser.insert(vec![user.clone()]).await?;
///
/// let repository = Repository::new(eraser.clone());
/// assert_eq!(repository.delete_many(vec![user]).await?, 1);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryEraser {
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryEraser {
    /// Creates a new, empty eraser.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    pub fn builder() -> InMemoryEraserBuilder {
        InMemoryEraserBuilder::default()
    }

    /// Stores new documents, each in the collection of its own partition.
    ///
    /// Nothing is written if any document fails to serialize or its key is
    /// already taken.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DocumentAlreadyExists`] on duplicate keys.
    pub async fn insert<T, K>(&self, documents: Vec<T>) -> RepositoryResult<()>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        let prepared = documents
            .iter()
            .map(|d| Ok((d.resolved_collection(), render_key(d.key()), d.to_bson()?)))
            .collect::<RepositoryResult<Vec<(String, String, Bson)>>>()?;

        let mut store = self.store.write().await;

        for (index, (collection, key, _)) in prepared.iter().enumerate() {
            let taken = store
                .get(collection)
                .is_some_and(|map| map.contains_key(key));
            let repeated = prepared[..index]
                .iter()
                .any(|(c, k, _)| c == collection && k == key);

            if taken || repeated {
                return Err(RepositoryError::DocumentAlreadyExists(key.clone(), collection.clone()));
            }
        }

        for (collection, key, document) in prepared {
            store
                .entry(collection)
                .or_default()
                .insert(key, document);
        }

        Ok(())
    }

    /// Returns the number of documents stored in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.store
            .read()
            .await
            .get(collection)
            .map_or(0, HashMap::len)
    }

    /// Lists the names of all collections that have been written to.
    pub async fn list_collections(&self) -> Vec<String> {
        self.store
            .read()
            .await
            .keys()
            .cloned()
            .collect()
    }

    async fn remove_matching(
        &self,
        collection: &str,
        expr: &Expr,
        limit: Option<usize>,
        cancellation: &Cancellation,
    ) -> RepositoryResult<i64> {
        cancellation.check()?;

        let mut store = self.store.write().await;
        let Some(collection_map) = store.get_mut(collection) else {
            return Ok(0);
        };

        let mut matched = Vec::new();

        for (key, document) in collection_map.iter() {
            if limit.is_some_and(|limit| matched.len() >= limit) {
                break;
            }

            if DocumentEvaluator::matches(document, expr)? {
                matched.push(key.clone());
            }
        }

        for key in &matched {
            collection_map.remove(key);
        }

        debug!(collection, deleted = matched.len(), "deleted documents matching filter");

        Ok(matched.len() as i64)
    }
}

fn render_key<K: DocumentKey>(key: &K) -> String {
    key.to_bson_key().to_string()
}


#[async_trait]
impl Eraser for InMemoryEraser {
    async fn delete_one<T, K>(
        &self,
        document: T,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        cancellation.check()?;

        let collection = document.resolved_collection();
        let key = render_key(document.key());

        let removed = self.store
            .write()
            .await
            .get_mut(&collection)
            .and_then(|map| map.remove(&key))
            .is_some();

        debug!(collection = %collection, key = %key, removed, "deleted document by key");

        Ok(removed as i64)
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
        self.remove_matching(
            &partitioned_collection_name::<T>(partition_key),
            filter.expr(),
            Some(1),
            &cancellation,
        )
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
        if documents.is_empty() {
            return Ok(0);
        }

        cancellation.check()?;

        let mut store = self.store.write().await;
        let mut deleted = 0;

        for (collection, group) in group_by_collection(documents) {
            let Some(collection_map) = store.get_mut(&collection) else {
                continue;
            };

            let removed = group
                .iter()
                .filter(|document| collection_map.remove(&render_key(document.key())).is_some())
                .count();

            debug!(collection = %collection, requested = group.len(), removed, "deleted documents by key");

            deleted += removed as i64;
        }

        Ok(deleted)
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
        self.remove_matching(
            &partitioned_collection_name::<T>(partition_key),
            filter.expr(),
            None,
            &cancellation,
        )
        .await
    }
}


/// Builder for [`InMemoryEraser`] instances.
///
/// ```ignore
/// use docrepo::eraser::EraserBuilder;
/// use docrepo_memory::InMemoryEraser;
///
/// let eraser = InMemoryEraser::builder().build().await?;
/// ```
#[derive(Default)]
pub struct InMemoryEraserBuilder;

#[async_trait]
impl EraserBuilder for InMemoryEraserBuilder {
    type Eraser = InMemoryEraser;

    async fn build(self) -> RepositoryResult<Self::Eraser> {
        Ok(InMemoryEraser::new())
    }
}
