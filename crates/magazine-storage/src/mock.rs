//! In-memory storage for tests

use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Default)]
struct MockState {
    files: HashMap<String, Bytes>,
    content_types: HashMap<String, String>,
    uploads: Vec<String>,
    deletes: Vec<String>,
}

/// Storage that keeps objects in memory and records every call.
///
/// Uploads to keys containing the configured failure marker fail with
/// `StorageError::UploadFailed`.
#[derive(Default)]
pub struct MockStorage {
    state: Mutex<MockState>,
    fail_marker: Option<String>,
    upload_delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail uploads whose key contains `marker`
    pub fn fail_on(mut self, marker: impl Into<String>) -> Self {
        self.fail_marker = Some(marker.into());
        self
    }

    /// Delay every upload, so concurrent calls overlap
    pub fn with_upload_delay(mut self, delay: Duration) -> Self {
        self.upload_delay = Some(delay);
        self
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check if an object is currently stored
    pub fn has_file(&self, key: &str) -> bool {
        self.state().files.contains_key(key)
    }

    /// Stored bytes (for test assertions)
    pub fn get_file(&self, key: &str) -> Option<Bytes> {
        self.state().files.get(key).cloned()
    }

    /// Content type the object at `key` was stored with
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.state().content_types.get(key).cloned()
    }

    /// Keys currently stored, sorted
    pub fn stored_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.state().files.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Every key an upload was attempted for, in call order
    pub fn upload_attempts(&self) -> Vec<String> {
        self.state().uploads.clone()
    }

    /// Every key a delete was requested for, in call order
    pub fn deleted_keys(&self) -> Vec<String> {
        self.state().deletes.clone()
    }

    /// Highest number of uploads observed running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn upload(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<StoredObject> {
        self.state().uploads.push(storage_key.to_string());

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.upload_delay {
            tokio::time::sleep(delay).await;
        }

        let result = match self.fail_marker {
            Some(ref marker) if storage_key.contains(marker.as_str()) => Err(
                StorageError::UploadFailed(format!("injected failure for {}", storage_key)),
            ),
            _ => {
                let size_bytes = data.len() as u64;
                let mut state = self.state();
                state.files.insert(storage_key.to_string(), data);
                state
                    .content_types
                    .insert(storage_key.to_string(), content_type.to_string());
                drop(state);
                Ok(StoredObject {
                    key: storage_key.to_string(),
                    url: self.public_url(storage_key),
                    size_bytes,
                    e_tag: Some(format!("\"{}\"", size_bytes)),
                    version: None,
                })
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let mut state = self.state();
        state.deletes.push(storage_key.to_string());
        state.files.remove(storage_key);
        state.content_types.remove(storage_key);
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.has_file(storage_key))
    }

    async fn get_presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        Ok(format!(
            "https://storage.test/presigned/{}?expires={}",
            storage_key,
            expires_in.as_secs()
        ))
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("https://storage.test/{}", storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
