//! Persistence gateway.
//!
//! Translates session events into reads and writes against a [`KeyValueStore`]
//! using two independent, versioned keys: one for the completed member record
//! and one for the location stashed between login and onboarding.
//!
//! Store failures stop here. A failed or unreadable read is reported as "no
//! record", a failed write is logged and dropped.

use serde::{de::DeserializeOwned, Serialize};

use crate::config::Config;
use crate::db::KeyValueStore;
use crate::errors::AppError;
use crate::models::{Location, Member};

/// Layout version embedded in every key.
pub const SCHEMA_VERSION: u32 = 1;

/// Namespaced keys for the persisted entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub member: String,
    pub pending_location: String,
}

impl StorageKeys {
    pub fn new(namespace: &str) -> Self {
        Self {
            member: format!("{}:v{}:member", namespace, SCHEMA_VERSION),
            pending_location: format!("{}:v{}:pending_location", namespace, SCHEMA_VERSION),
        }
    }
}

pub struct PersistenceGateway<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn from_config(store: S, config: &Config) -> Self {
        Self::new(store, StorageKeys::new(&config.key_namespace))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub async fn load_member(&self) -> Option<Member> {
        self.read_json(&self.keys.member).await
    }

    pub async fn save_member(&self, member: &Member) {
        self.write_json(&self.keys.member, member).await;
    }

    pub async fn stash_location(&self, location: &Location) {
        self.write_json(&self.keys.pending_location, location).await;
    }

    pub async fn load_stashed_location(&self) -> Option<Location> {
        self.read_json(&self.keys.pending_location).await
    }

    pub async fn clear_stashed_location(&self) {
        if let Err(e) = self.store.remove(&self.keys.pending_location).await {
            tracing::warn!(
                key = %self.keys.pending_location,
                "Failed to clear stashed location: {}",
                e
            );
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, "Read failed, treating as absent: {}", e);
                return None;
            }
        };

        match decode(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, "Discarding unreadable record: {}", e);
                None
            }
        }
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match encode(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(key, "Failed to encode record: {}", e);
                return;
            }
        };

        match self.store.set(key, &raw).await {
            Ok(()) => tracing::debug!(key, bytes = raw.len(), "Record persisted"),
            // Not retried; the in-memory session stays ahead of the store
            Err(e) => tracing::warn!(key, "Write failed, update not persisted: {}", e),
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string(value)?)
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, AppError> {
    Ok(serde_json::from_str(raw)?)
}
