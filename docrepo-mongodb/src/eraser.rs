use async_trait::async_trait;
use futures::{stream::iter, StreamExt, TryStreamExt};
use bson::{Bson, Document, doc};
use mongodb::{
    Client, Collection as MongoCollection,
    options::ClientOptions,
    results::DeleteResult,
};
use tracing::debug;

use docrepo_core::{
    cancel::Cancellation,
    document::{DocumentKey, HasKey, group_by_collection, partitioned_collection_name},
    eraser::{Eraser, EraserBuilder},
    error::{RepositoryError, RepositoryResult},
    query::Predicate,
};

use crate::{query::MongoQueryTranslator, sanitizer::NameSanitizer};


/// Eraser backed by a MongoDB database.
///
/// Keyed deletes filter on `_id`, so documents must be stored with their key in
/// that field. Partitioned collections resolve to `"{partition}-{collection}"`
/// before sanitization.
#[derive(Debug, Clone)]
pub struct MongoDbEraser {
    client: Client,
    database: String,
}

impl MongoDbEraser {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbEraserBuilder {
        MongoDbEraserBuilder::new(dsn, database)
    }

    /// Closes the underlying client, waiting for in-flight operations.
    pub async fn shutdown(self) -> RepositoryResult<()> {
        self.client.shutdown().await;

        Ok(())
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(&collection_namespace(collection_name))
    }

    async fn delete_by_query(
        &self,
        collection: &str,
        query: Document,
        single: bool,
        cancellation: &Cancellation,
    ) -> RepositoryResult<i64> {
        let target = self.get_collection(collection);

        let result = cancellation
            .run(async {
                let outcome = if single {
                    target.delete_one(query).await
                } else {
                    target.delete_many(query).await
                };

                outcome.map_err(|e| RepositoryError::Backend(e.to_string()))
            })
            .await?;

        let deleted = deleted_count(result)?;

        debug!(collection, deleted, single, "deleted documents");

        Ok(deleted)
    }
}

fn collection_namespace(collection_name: &str) -> String {
    NameSanitizer::sanitize(collection_name)
}

fn deleted_count(result: DeleteResult) -> RepositoryResult<i64> {
    i64::try_from(result.deleted_count)
        .map_err(|e| RepositoryError::Backend(e.to_string()))
}

fn key_query<T, K>(documents: &[T]) -> Document
where
    T: HasKey<K>,
    K: DocumentKey,
{
    doc! {
        "_id": {
            "$in": documents
                .iter()
                .map(|document| document.key().to_bson_key())
                .collect::<Vec<Bson>>(),
        }
    }
}

#[async_trait]
impl Eraser for MongoDbEraser {
    async fn delete_one<T, K>(
        &self,
        document: T,
        cancellation: Cancellation,
    ) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        let collection = partitioned_collection_name::<T>(document.partition_key());

        self.delete_by_query(
            &collection,
            doc! { "_id": document.key().to_bson_key() },
            true,
            &cancellation,
        )
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
        self.delete_by_query(
            &partitioned_collection_name::<T>(partition_key),
            MongoQueryTranslator::translate(filter.expr())?,
            true,
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
        let cancellation = &cancellation;

        iter(group_by_collection(documents))
            .then(move |(collection, group)| async move {
                self.delete_by_query(
                    &collection,
                    key_query::<T, K>(&group),
                    false,
                    cancellation,
                )
                .await
            })
            .try_fold(0, |total, deleted| async move {
                Ok::<_, RepositoryError>(total + deleted)
            })
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
        self.delete_by_query(
            &partitioned_collection_name::<T>(partition_key),
            MongoQueryTranslator::translate(filter.expr())?,
            false,
            &cancellation,
        )
        .await
    }
}


/// Builder for [`MongoDbEraser`] instances.
///
/// ```ignore
/// use docrepo::{eraser::EraserBuilder, mongodb::MongoDbEraser};
///
/// let eraser = MongoDbEraser::builder("mongodb://localhost:27017", "app")
///     .build()
///     .await?;
/// ```
pub struct MongoDbEraserBuilder {
    dsn: String,
    database: String,
}

impl MongoDbEraserBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl EraserBuilder for MongoDbEraserBuilder {
    type Eraser = MongoDbEraser;

    async fn build(self) -> RepositoryResult<Self::Eraser> {
        debug!(database = %self.database, "connecting mongodb eraser");

        Ok(MongoDbEraser::new(
            Client::with_options(
                ClientOptions::parse(&self.dsn)
                    .await
                    .map_err(|e| RepositoryError::Initialization(e.to_string()))?,
            )
            .map_err(|e| RepositoryError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}
