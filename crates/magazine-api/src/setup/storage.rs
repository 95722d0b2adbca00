//! Storage setup and initialization

use anyhow::Result;
use magazine_core::Config;
use magazine_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config).await?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = ?config.s3_bucket(),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
