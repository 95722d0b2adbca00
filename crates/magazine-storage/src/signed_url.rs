//! Signed URL capability
//!
//! A [`SignedUrl`] carries the signer it resolves through, so any code that
//! serializes a stored-object reference gets a URL without looking up a
//! process-wide client.

use crate::traits::{Storage, StorageResult};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Capability to mint a temporary URL for a storage key.
#[async_trait]
pub trait UrlSigner: Send + Sync {
    async fn sign(&self, storage_key: &str) -> StorageResult<String>;
}

/// Signs keys through a storage backend's presigned GET URLs.
#[derive(Clone)]
pub struct StorageUrlSigner {
    storage: Arc<dyn Storage>,
    expires_in: Duration,
}

impl StorageUrlSigner {
    pub fn new(storage: Arc<dyn Storage>, expires_in: Duration) -> Self {
        Self {
            storage,
            expires_in,
        }
    }
}

#[async_trait]
impl UrlSigner for StorageUrlSigner {
    async fn sign(&self, storage_key: &str) -> StorageResult<String> {
        self.storage
            .get_presigned_url(storage_key, self.expires_in)
            .await
    }
}

/// Reference to a stored object together with the signer that resolves it.
#[derive(Clone)]
pub struct SignedUrl {
    key: String,
    signer: Arc<dyn UrlSigner>,
}

/// Serializable result of resolving a [`SignedUrl`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedUrl {
    pub key: String,
    pub url: String,
}

impl SignedUrl {
    pub fn new(key: impl Into<String>, signer: Arc<dyn UrlSigner>) -> Self {
        Self {
            key: key.into(),
            signer,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Resolve the reference into a signed URL.
    ///
    /// A signing failure is logged and yields an empty URL so the reference
    /// still serializes.
    pub async fn resolve(&self) -> ResolvedUrl {
        let url = match self.signer.sign(&self.key).await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, key = %self.key, "Failed to generate signed URL");
                String::new()
            }
        };

        ResolvedUrl {
            key: self.key.clone(),
            url,
        }
    }
}

impl fmt::Debug for SignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedUrl").field("key", &self.key).finish()
    }
}
