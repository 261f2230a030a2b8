//! SQLite-backed content store.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;

use super::{content_hash, normalize_pointer, ContentStore, StoreError, StoreResult, UploadPayload};
use crate::db::{Database, StoredBlob};

/// Content store keeping blobs in the local database.
///
/// Hashes are the hex SHA-256 of the stored bytes, so uploading the same
/// document twice yields the same hash and one stored copy.
#[derive(Clone)]
pub struct LocalContentStore {
    db: Arc<Mutex<Database>>,
    gateway: String,
}

impl LocalContentStore {
    pub fn new(db: Arc<Mutex<Database>>, gateway: impl Into<String>) -> Self {
        Self {
            db,
            gateway: gateway.into(),
        }
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|e| StoreError::Backend(format!("Lock poisoned: {}", e)))
    }
}

impl ContentStore for LocalContentStore {
    fn upload(&self, payload: &UploadPayload) -> StoreResult<String> {
        let bytes = payload.bytes()?;
        let hash = content_hash(&bytes);
        let blob = StoredBlob {
            hash: hash.clone(),
            name: payload.name().map(str::to_string),
            content_type: payload.content_type().to_string(),
            bytes,
        };

        let created = self
            .lock()?
            .put_blob(&blob)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        debug!(%hash, size = blob.bytes.len(), created, "Content uploaded");
        Ok(hash)
    }

    fn fetch_json(&self, pointer: &str) -> StoreResult<Value> {
        let hash = normalize_pointer(pointer)?;
        let blob = self
            .lock()?
            .get_blob(hash)
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .ok_or_else(|| StoreError::NotFound(hash.to_string()))?;
        serde_json::from_slice(&blob.bytes).map_err(|_| StoreError::NotJson(hash.to_string()))
    }

    fn url(&self, pointer: &str) -> StoreResult<String> {
        let hash = normalize_pointer(pointer)?;
        Ok(format!("{}/{}", self.gateway.trim_end_matches('/'), hash))
    }
}
