//! Magazine Storage Library
//!
//! This crate provides the storage abstraction used by the upload pipeline,
//! with implementations for S3 (via `object_store`) and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are `{prefix}/{file_name}`, or just `{file_name}` when the prefix is
//! empty. Keys must not contain `..` or a leading `/`. Key generation is
//! centralized in the `keys` module so every caller stays consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(any(test, feature = "test-helpers"))]
pub mod mock;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod signed_url;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{content_type_for_key, public_bucket_url, storage_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use magazine_core::StorageBackend;
#[cfg(any(test, feature = "test-helpers"))]
pub use mock::MockStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use signed_url::{ResolvedUrl, SignedUrl, StorageUrlSigner, UrlSigner};
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
