use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use common_utils::errors::CustomResult;
use domain_types::{session::SessionId, user::UserRecord};
use tokio::sync::RwLock;

use super::{SessionCache, StorageError, UserStore};

/// A thread-safe in-memory session cache.
///
/// Uses `Arc<RwLock<HashMap<..>>>` to allow shared concurrent access. The
/// default backend for development and tests.
#[derive(Default, Clone)]
pub struct InMemorySessionCache {
    entries: Arc<RwLock<HashMap<SessionId, serde_json::Value>>>,
}

impl InMemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionCache for InMemorySessionCache {
    async fn get(&self, id: &SessionId) -> CustomResult<Option<serde_json::Value>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.get(id).cloned())
    }

    async fn put(
        &self,
        id: &SessionId,
        snapshot: serde_json::Value,
    ) -> CustomResult<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.insert(id.clone(), snapshot);
        Ok(())
    }
}

/// A thread-safe in-memory user store, seeded with the demo identity.
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with one user already present.
    pub fn seeded(user: UserRecord) -> Self {
        let mut users = HashMap::new();
        users.insert(user.email.clone(), user);
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> CustomResult<Option<UserRecord>, StorageError> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn upsert(&self, user: UserRecord) -> CustomResult<(), StorageError> {
        let mut users = self.users.write().await;
        users.insert(user.email.clone(), user);
        Ok(())
    }
}
