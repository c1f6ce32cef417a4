//! Redis-backed implementation of [`KvStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use redis::AsyncCommands;

use super::{KvStore, StoreError};

/// Redis client for agent records.
///
/// Obtains a multiplexed async connection per operation; the connection is
/// cheap to clone and shared under the hood.
pub struct RedisKv {
    client: redis::Client,
}

impl RedisKv {
    /// Create a new Redis store from a connection URL.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the URL is invalid.
    pub fn connect(url: &str) -> Result<Self, StoreError> {
        let client =
            redis::Client::open(url).map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { client })
    }

    async fn conn(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl KvStore for RedisKv {
    async fn hash_get_all(
        &self,
        key: &str,
    ) -> Result<Option<HashMap<String, String>>, StoreError> {
        let mut conn = self.conn().await?;
        let map: HashMap<String, String> = conn.hgetall(key).await?;
        // HGETALL returns an empty map for a missing key
        if map.is_empty() { Ok(None) } else { Ok(Some(map)) }
    }

    async fn hash_set_fields(
        &self,
        key: &str,
        fields: &[(&str, String)],
    ) -> Result<(), StoreError> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn().await?;
        conn.hset_multiple::<_, _, _, ()>(key, fields).await?;
        Ok(())
    }

    async fn hash_delete_field(&self, key: &str, field: &str) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        conn.hdel::<_, _, ()>(key, field).await?;
        Ok(())
    }

    async fn delete_key(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.conn().await?;
        let removed: u64 = conn.del(key).await?;
        Ok(removed)
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn().await?;
        // KEYS is acceptable here: the agent keyspace is tiny by design
        let keys: Vec<String> = conn.keys(format!("{prefix}*")).await?;
        Ok(keys)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;
        Ok(())
    }
}
