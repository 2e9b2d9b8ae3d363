//! Pluggable persistence for session snapshots and user records.

use async_trait::async_trait;
use common_utils::errors::CustomResult;
use domain_types::{session::SessionId, user::UserRecord};

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize the value for storage")]
    SerializationFailed,
    #[error("Failed to deserialize the stored value")]
    DeserializationFailed,
    #[error("The storage backend reported an error: {0}")]
    BackendError(String),
}

/// The durable key-value cache holding one snapshot per session id.
/// Writes are unconditional overwrites; the last writer wins.
#[async_trait]
pub trait SessionCache: Send + Sync {
    async fn get(&self, id: &SessionId) -> CustomResult<Option<serde_json::Value>, StorageError>;

    async fn put(
        &self,
        id: &SessionId,
        snapshot: serde_json::Value,
    ) -> CustomResult<(), StorageError>;
}

/// User records, keyed by email.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> CustomResult<Option<UserRecord>, StorageError>;

    async fn upsert(&self, user: UserRecord) -> CustomResult<(), StorageError>;
}
