use crate::db::container::{Container, StoreError, stamp};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-process collection with the same contract as the Postgres one.
pub struct MemoryContainer {
    name: String,
    items: RwLock<BTreeMap<(String, String), Value>>,
}

impl MemoryContainer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            items: RwLock::default(),
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

fn key(id: &str, partition_key: &str) -> (String, String) {
    (partition_key.to_string(), id.to_string())
}

#[async_trait]
impl Container for MemoryContainer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_item(&self, id: &str, partition_key: &str) -> Result<Value, StoreError> {
        self.items
            .read()
            .await
            .get(&key(id, partition_key))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create_item(
        &self,
        id: &str,
        partition_key: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        let mut items = self.items.write().await;
        let key = key(id, partition_key);
        if items.contains_key(&key) {
            return Err(StoreError::Conflict);
        }
        let body = stamp(body);
        items.insert(key, body.clone());
        Ok(body)
    }

    async fn upsert_item(
        &self,
        id: &str,
        partition_key: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        let body = stamp(body);
        self.items
            .write()
            .await
            .insert(key(id, partition_key), body.clone());
        Ok(body)
    }

    async fn read_all_items(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.items.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn read_missing_item_is_not_found() {
        let container = MemoryContainer::new("users");
        assert!(matches!(
            container.read_item("a@x.com", "a@x.com").await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn create_stamps_and_rejects_duplicates() {
        let container = MemoryContainer::new("users");
        let created = container
            .create_item("a@x.com", "a@x.com", json!({"id": "a@x.com"}))
            .await
            .unwrap();
        assert!(created["_ts"].as_i64().unwrap() > 0);

        assert!(matches!(
            container
                .create_item("a@x.com", "a@x.com", json!({"id": "a@x.com"}))
                .await,
            Err(StoreError::Conflict)
        ));
        assert_eq!(container.read_item("a@x.com", "a@x.com").await.unwrap(), created);
    }

    #[tokio::test]
    async fn same_id_in_other_partition_is_distinct() {
        let container = MemoryContainer::new("votes");
        container.create_item("x", "p1", json!({"id": "x"})).await.unwrap();
        container.create_item("x", "p2", json!({"id": "x"})).await.unwrap();
        assert_eq!(container.len().await, 2);
    }

    #[tokio::test]
    async fn upsert_replaces_existing_item() {
        let container = MemoryContainer::new("votes");
        container
            .upsert_item("v", "u", json!({"id": "v", "n": 1}))
            .await
            .unwrap();
        container
            .upsert_item("v", "u", json!({"id": "v", "n": 2}))
            .await
            .unwrap();

        let all = container.read_all_items().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["n"], 2);
    }
}
