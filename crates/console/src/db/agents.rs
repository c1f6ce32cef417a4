//! Agent repository over the key-value store.
//!
//! All operations are single-key reads and writes guarded by validation in
//! the route layer. Create-uniqueness is checked by the caller before
//! `create`; there is no store-side transaction, so concurrent writers for
//! the same name can race. That is an accepted property of this console,
//! not something the repository papers over.

use chrono::Utc;
use thiserror::Error;

use voicedesk_core::{AgentName, AssistantId, Patch, PublicKey};

use super::{KvStore, StoreError};
use crate::models::Agent;
use crate::models::agent::fields;

/// Key prefix for agent hashes.
pub const KEY_PREFIX: &str = "agent:";

fn agent_key(name: &AgentName) -> String {
    format!("{KEY_PREFIX}{name}")
}

/// Partial update to apply to an existing agent.
#[derive(Debug, Default)]
pub struct AgentChanges {
    /// Replacement assistant id, when provided.
    pub assistant_id: Option<AssistantId>,
    /// Three-way public key change.
    pub public_key: Patch<PublicKey>,
}

/// Errors from [`AgentRepository::update`].
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("agent not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Repository for agent store operations.
pub struct AgentRepository<'a> {
    store: &'a dyn KvStore,
}

impl<'a> AgentRepository<'a> {
    /// Create a new agent repository.
    #[must_use]
    pub const fn new(store: &'a dyn KvStore) -> Self {
        Self { store }
    }

    /// Get an agent by name.
    ///
    /// A stored record missing any required field is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store read fails.
    pub async fn get(&self, name: &AgentName) -> Result<Option<Agent>, StoreError> {
        let record = self.store.hash_get_all(&agent_key(name)).await?;
        Ok(record.as_ref().and_then(Agent::from_record))
    }

    /// List all complete agent records.
    ///
    /// The read path is best-effort: a store failure degrades to an empty
    /// list, and individual incomplete records are skipped.
    pub async fn list_all(&self) -> Vec<Agent> {
        let keys = match self.store.list_keys(KEY_PREFIX).await {
            Ok(keys) => keys,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to list agent keys, returning empty list");
                return Vec::new();
            }
        };

        let mut agents = Vec::with_capacity(keys.len());
        for key in keys {
            match self.store.hash_get_all(&key).await {
                Ok(Some(record)) => {
                    if let Some(agent) = Agent::from_record(&record) {
                        agents.push(agent);
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(%key, error = %err, "Failed to read agent record, skipping");
                }
            }
        }
        agents
    }

    /// Write a brand-new agent record with the current timestamp.
    ///
    /// Callers must check for an existing record first; this method
    /// overwrites without looking.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store write fails.
    pub async fn create(
        &self,
        name: AgentName,
        assistant_id: AssistantId,
        public_key: Option<PublicKey>,
    ) -> Result<Agent, StoreError> {
        let agent = Agent {
            name,
            assistant_id,
            public_key,
            created_at: Utc::now(),
        };

        self.store
            .hash_set_fields(&agent_key(&agent.name), &agent.to_record())
            .await?;
        Ok(agent)
    }

    /// Apply a partial update to an existing agent.
    ///
    /// Only the fields explicitly provided change: an absent `assistant_id`
    /// and a [`Patch::Keep`] public key leave the stored values untouched,
    /// [`Patch::Clear`] deletes the `publicKey` field, and the store write
    /// touches only the fields that actually changed. Returns the merged
    /// logical agent.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::NotFound`] when no record exists for `name`,
    /// or [`UpdateError::Store`] if a store call fails.
    pub async fn update(
        &self,
        name: &AgentName,
        changes: AgentChanges,
    ) -> Result<Agent, UpdateError> {
        let existing = self.get(name).await?.ok_or(UpdateError::NotFound)?;
        let key = agent_key(name);

        let next_assistant_id = changes
            .assistant_id
            .unwrap_or_else(|| existing.assistant_id.clone());

        let mut changed_fields = Vec::new();
        if next_assistant_id != existing.assistant_id {
            changed_fields.push((fields::ASSISTANT_ID, next_assistant_id.as_str().to_owned()));
        }
        if let Patch::Set(public_key) = &changes.public_key {
            changed_fields.push((fields::PUBLIC_KEY, public_key.as_str().to_owned()));
        }

        if !changed_fields.is_empty() {
            self.store.hash_set_fields(&key, &changed_fields).await?;
        }
        if matches!(changes.public_key, Patch::Clear) {
            self.store.hash_delete_field(&key, fields::PUBLIC_KEY).await?;
        }

        let next_public_key = match changes.public_key {
            Patch::Keep => existing.public_key,
            Patch::Clear => None,
            Patch::Set(public_key) => Some(public_key),
        };

        Ok(Agent {
            name: existing.name,
            assistant_id: next_assistant_id,
            public_key: next_public_key,
            created_at: existing.created_at,
        })
    }

    /// Delete an agent record. Returns whether a record existed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store delete fails.
    pub async fn remove(&self, name: &AgentName) -> Result<bool, StoreError> {
        let removed = self.store.delete_key(&agent_key(name)).await?;
        Ok(removed > 0)
    }
}
