use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("item not found")]
    NotFound,
    #[error("item already exists")]
    Conflict,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("malformed document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A document collection with partition-key semantics.
///
/// Items are JSON objects addressed by `(partition_key, id)`. Every write
/// stamps the document with `_ts`, the Unix time of the write, and returns
/// the document as stored.
#[async_trait]
pub trait Container: Send + Sync {
    fn name(&self) -> &str;

    /// Fails with [`StoreError::NotFound`] when no such item exists.
    async fn read_item(&self, id: &str, partition_key: &str) -> Result<Value, StoreError>;

    /// Fails with [`StoreError::Conflict`] when the item already exists.
    async fn create_item(
        &self,
        id: &str,
        partition_key: &str,
        body: Value,
    ) -> Result<Value, StoreError>;

    async fn upsert_item(
        &self,
        id: &str,
        partition_key: &str,
        body: Value,
    ) -> Result<Value, StoreError>;

    /// Every item in the collection, ordered by `(partition_key, id)`.
    async fn read_all_items(&self) -> Result<Vec<Value>, StoreError>;
}

pub(crate) fn stamp(mut body: Value) -> Value {
    if let Value::Object(fields) = &mut body {
        fields.insert("_ts".to_string(), Value::from(Utc::now().timestamp()));
    }
    body
}
