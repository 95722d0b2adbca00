//! Magazine Core Library
//!
//! This crate provides the configuration, error types and storage backend
//! selection shared by the storage, processing and API crates.

pub mod config;
pub mod error;
pub mod storage_types;

// Re-export commonly used types
pub use config::{ApiConfig, BaseConfig, Config};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
