//! In-memory implementation of [`KvStore`].
//!
//! Used by the integration tests and for running the console locally
//! without a Redis instance. Mirrors Redis hash semantics, including the
//! empty-hash-means-missing behavior of `HGETALL` and key removal once the
//! last field of a hash is deleted.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KvStore, StoreError};

/// In-memory hash store keyed by string.
#[derive(Default)]
pub struct MemoryKv {
    hashes: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl MemoryKv {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn hash_get_all(
        &self,
        key: &str,
    ) -> Result<Option<HashMap<String, String>>, StoreError> {
        let hashes = self.hashes.read().await;
        Ok(hashes.get(key).filter(|h| !h.is_empty()).cloned())
    }

    async fn hash_set_fields(
        &self,
        key: &str,
        fields: &[(&str, String)],
    ) -> Result<(), StoreError> {
        let mut hashes = self.hashes.write().await;
        let hash = hashes.entry(key.to_owned()).or_default();
        for (field, value) in fields {
            hash.insert((*field).to_owned(), value.clone());
        }
        Ok(())
    }

    async fn hash_delete_field(&self, key: &str, field: &str) -> Result<(), StoreError> {
        let mut hashes = self.hashes.write().await;
        if let Some(hash) = hashes.get_mut(key) {
            hash.remove(field);
            if hash.is_empty() {
                hashes.remove(key);
            }
        }
        Ok(())
    }

    async fn delete_key(&self, key: &str) -> Result<u64, StoreError> {
        let mut hashes = self.hashes.write().await;
        Ok(u64::from(hashes.remove(key).is_some()))
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let hashes = self.hashes.read().await;
        Ok(hashes
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let store = MemoryKv::new();
        assert!(store.hash_get_all("agent:nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = MemoryKv::new();
        store
            .hash_set_fields("agent:a1", &[("name", "a1".to_owned())])
            .await
            .unwrap();
        let hash = store.hash_get_all("agent:a1").await.unwrap().unwrap();
        assert_eq!(hash.get("name").map(String::as_str), Some("a1"));
    }

    #[tokio::test]
    async fn deleting_last_field_removes_key() {
        let store = MemoryKv::new();
        store
            .hash_set_fields("agent:a1", &[("name", "a1".to_owned())])
            .await
            .unwrap();
        store.hash_delete_field("agent:a1", "name").await.unwrap();
        assert!(store.hash_get_all("agent:a1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_key_reports_existence() {
        let store = MemoryKv::new();
        store
            .hash_set_fields("agent:a1", &[("name", "a1".to_owned())])
            .await
            .unwrap();
        assert_eq!(store.delete_key("agent:a1").await.unwrap(), 1);
        assert_eq!(store.delete_key("agent:a1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_keys_filters_by_prefix() {
        let store = MemoryKv::new();
        store
            .hash_set_fields("agent:a1", &[("name", "a1".to_owned())])
            .await
            .unwrap();
        store
            .hash_set_fields("other:b2", &[("name", "b2".to_owned())])
            .await
            .unwrap();
        let keys = store.list_keys("agent:").await.unwrap();
        assert_eq!(keys, vec!["agent:a1".to_owned()]);
    }
}
