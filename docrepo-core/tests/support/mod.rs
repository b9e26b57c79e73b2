//! Test doubles shared by the repository integration tests.

#![allow(dead_code)]

use std::{any::type_name, sync::Mutex};

use async_trait::async_trait;
use bson::Bson;
use serde::{Deserialize, Serialize};

use docrepo_core::{
    cancel::Cancellation,
    document::{Document, DocumentKey, HasKey, Uuid},
    eraser::Eraser,
    error::{RepositoryError, RepositoryResult},
    query::{Expr, Predicate},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestDocument {
    pub id: Uuid,
    pub version: i32,
    pub some_content: String,
}

impl TestDocument {
    pub fn new() -> Self {
        Self {
            id: Uuid::new(),
            version: 1,
            some_content: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn many(count: usize) -> Vec<Self> {
        (0..count).map(|_| Self::new()).collect()
    }
}

impl Document for TestDocument {
    fn collection_name() -> &'static str {
        "test_documents"
    }
}

impl HasKey<Uuid> for TestDocument {
    fn key(&self) -> &Uuid {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestDocumentWithKey<K> {
    pub id: K,
    pub some_content: String,
}

impl TestDocumentWithKey<i32> {
    pub fn many(count: usize) -> Vec<Self> {
        (0..count as i32)
            .map(|id| Self { id, some_content: uuid::Uuid::new_v4().to_string() })
            .collect()
    }
}

impl<K> Document for TestDocumentWithKey<K>
where
    K: DocumentKey + Serialize + for<'de> Deserialize<'de>,
{
    fn collection_name() -> &'static str {
        "test_documents_with_key"
    }
}

impl<K> HasKey<K> for TestDocumentWithKey<K>
where
    K: DocumentKey + Serialize + for<'de> Deserialize<'de>,
{
    fn key(&self) -> &K {
        &self.id
    }
}

/// What the eraser was asked to do, with the document and key types it was
/// instantiated with.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    DeleteOne {
        document: &'static str,
        key: &'static str,
        id: Bson,
    },
    DeleteOneMatching {
        document: &'static str,
        key: &'static str,
        filter: Expr,
        partition_key: Option<String>,
    },
    DeleteMany {
        document: &'static str,
        key: &'static str,
        ids: Vec<Bson>,
    },
    DeleteManyMatching {
        document: &'static str,
        key: &'static str,
        filter: Expr,
        partition_key: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct Call {
    pub invocation: Invocation,
    pub cancellation: Cancellation,
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Count(i64),
    Backend,
    Cancelled,
}

impl Outcome {
    fn produce(self) -> RepositoryResult<i64> {
        match self {
            Outcome::Count(count) => Ok(count),
            Outcome::Backend => Err(RepositoryError::Backend("connection reset".into())),
            Outcome::Cancelled => Err(RepositoryError::Cancelled),
        }
    }
}

/// Eraser spy: records every call and answers with a canned outcome.
#[derive(Debug)]
pub struct RecordingEraser {
    calls: Mutex<Vec<Call>>,
    outcome: Outcome,
}

impl RecordingEraser {
    pub fn returning(count: i64) -> Self {
        Self::with_outcome(Outcome::Count(count))
    }

    /// Fails every call with a driver error.
    pub fn failing() -> Self {
        Self::with_outcome(Outcome::Backend)
    }

    pub fn cancelling() -> Self {
        Self::with_outcome(Outcome::Cancelled)
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self { calls: Mutex::new(Vec::new()), outcome }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the only recorded call, failing the test if there were more or fewer.
    pub fn single_call(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one eraser call, got {calls:?}");
        calls.into_iter().next().unwrap()
    }

    fn record(&self, invocation: Invocation, cancellation: Cancellation) -> RepositoryResult<i64> {
        self.calls.lock().unwrap().push(Call { invocation, cancellation });
        self.outcome.produce()
    }
}

#[async_trait]
impl Eraser for RecordingEraser {
    async fn delete_one<T, K>(&self, document: T, cancellation: Cancellation) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.record(
            Invocation::DeleteOne {
                document: type_name::<T>(),
                key: type_name::<K>(),
                id: document.key().to_bson_key(),
            },
            cancellation,
        )
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
        self.record(
            Invocation::DeleteOneMatching {
                document: type_name::<T>(),
                key: type_name::<K>(),
                filter: filter.into_expr(),
                partition_key: partition_key.map(str::to_string),
            },
            cancellation,
        )
    }

    async fn delete_many<T, K>(&self, documents: Vec<T>, cancellation: Cancellation) -> RepositoryResult<i64>
    where
        T: HasKey<K>,
        K: DocumentKey,
    {
        self.record(
            Invocation::DeleteMany {
                document: type_name::<T>(),
                key: type_name::<K>(),
                ids: documents.iter().map(|d| d.key().to_bson_key()).collect(),
            },
            cancellation,
        )
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
        self.record(
            Invocation::DeleteManyMatching {
                document: type_name::<T>(),
                key: type_name::<K>(),
                filter: filter.into_expr(),
                partition_key: partition_key.map(str::to_string),
            },
            cancellation,
        )
    }
}

pub fn ids_of<T, K>(documents: &[T]) -> Vec<Bson>
where
    T: HasKey<K>,
    K: DocumentKey,
{
    documents.iter().map(|d| d.key().to_bson_key()).collect()
}
