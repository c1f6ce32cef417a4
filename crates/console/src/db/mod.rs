//! Key-value store access for agent records.
//!
//! # Store layout
//!
//! Agent records are Redis hashes keyed `agent:<name>`:
//!
//! | field | meaning |
//! |---|---|
//! | `name` | normalized agent name (also in the key) |
//! | `assistantId` | third-party assistant identifier |
//! | `publicKey` | optional widget public key |
//! | `createdAt` | RFC 3339 creation timestamp, set once |
//!
//! The [`KvStore`] trait abstracts the five hash operations the console
//! needs so the agent repository can run against Redis in production and an
//! in-memory store in tests.

mod agents;
mod memory;
mod redis_store;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

pub use agents::{AgentChanges, AgentRepository, UpdateError};
pub use memory::MemoryKv;
pub use redis_store::RedisKv;

/// Errors from the underlying key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store client could not be created or reached.
    #[error("store connection failed: {0}")]
    Connection(String),
    /// A store command failed.
    #[error("store command failed: {0}")]
    Command(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout() {
            Self::Connection(err.to_string())
        } else {
            Self::Command(err.to_string())
        }
    }
}

/// Abstraction over the hash-style key-value store holding agent records.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read all fields of a hash. Returns `None` when the key is absent.
    async fn hash_get_all(&self, key: &str)
    -> Result<Option<HashMap<String, String>>, StoreError>;

    /// Set the given fields on a hash, creating the key if needed.
    async fn hash_set_fields(
        &self,
        key: &str,
        fields: &[(&str, String)],
    ) -> Result<(), StoreError>;

    /// Remove a single field from a hash. Removing a missing field is a
    /// no-op.
    async fn hash_delete_field(&self, key: &str, field: &str) -> Result<(), StoreError>;

    /// Delete a key outright. Returns the number of keys removed.
    async fn delete_key(&self, key: &str) -> Result<u64, StoreError>;

    /// List all keys starting with `prefix`.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Connectivity probe for the readiness endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
