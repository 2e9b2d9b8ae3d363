use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use common_utils::errors::CustomResult;
use domain_types::{session::SessionId, user::UserRecord};
use error_stack::{report, ResultExt};
use rocksdb::{ColumnFamilyDescriptor, Options, DB};

use super::{SessionCache, StorageError, UserStore};

/// Column family for session snapshots.
pub const CF_SESSIONS: &str = "sessions";
/// Column family for user records.
pub const CF_USERS: &str = "users";

/// A persistent store backed by RocksDB, keeping sessions and users in
/// separate column families. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> CustomResult<Self, StorageError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_sessions = ColumnFamilyDescriptor::new(CF_SESSIONS, Options::default());
        let cf_users = ColumnFamilyDescriptor::new(CF_USERS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_sessions, cf_users])
            .map_err(|error| report!(StorageError::BackendError(error.to_string())))?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf_handle(&self, name: &str) -> CustomResult<&rocksdb::ColumnFamily, StorageError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| report!(StorageError::BackendError(format!("missing column family {name}"))))
    }
}

#[async_trait]
impl SessionCache for RocksDbStore {
    async fn get(&self, id: &SessionId) -> CustomResult<Option<serde_json::Value>, StorageError> {
        let cf = self.cf_handle(CF_SESSIONS)?;
        let stored = self
            .db
            .get_cf(cf, id.as_str())
            .map_err(|error| report!(StorageError::BackendError(error.to_string())))?;

        stored
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .change_context(StorageError::DeserializationFailed)
    }

    async fn put(
        &self,
        id: &SessionId,
        snapshot: serde_json::Value,
    ) -> CustomResult<(), StorageError> {
        let cf = self.cf_handle(CF_SESSIONS)?;
        let value =
            serde_json::to_vec(&snapshot).change_context(StorageError::SerializationFailed)?;

        self.db
            .put_cf(cf, id.as_str(), value)
            .map_err(|error| report!(StorageError::BackendError(error.to_string())))
    }
}

#[async_trait]
impl UserStore for RocksDbStore {
    async fn find_by_email(&self, email: &str) -> CustomResult<Option<UserRecord>, StorageError> {
        let cf = self.cf_handle(CF_USERS)?;
        let stored = self
            .db
            .get_cf(cf, email)
            .map_err(|error| report!(StorageError::BackendError(error.to_string())))?;

        stored
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .change_context(StorageError::DeserializationFailed)
    }

    async fn upsert(&self, user: UserRecord) -> CustomResult<(), StorageError> {
        let cf = self.cf_handle(CF_USERS)?;
        let value = serde_json::to_vec(&user).change_context(StorageError::SerializationFailed)?;

        self.db
            .put_cf(cf, &user.email, value)
            .map_err(|error| report!(StorageError::BackendError(error.to_string())))
    }
}
