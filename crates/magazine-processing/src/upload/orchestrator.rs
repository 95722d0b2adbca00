//! Upload orchestrator: validate every file, then fan out one task per
//! derivative and join them at a single barrier.

use super::artifact::{UploadedArtifact, UploadedFiles};
use super::config::UploadConfig;
use super::derivative::Derivative;
use super::error::UploadError;
use super::files::{FormFile, FormFiles};
use crate::image::{render_variant, ImageKind};
use bytes::Bytes;
use magazine_storage::{content_type_for_key, storage_key, Storage};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Default bound on simultaneously running upload tasks
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Execution options shared by every run of an orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    /// Tasks allowed to encode or upload at the same time (min 1)
    pub max_concurrency: usize,
    /// Delete objects already stored when the request fails
    pub rollback_on_failure: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            rollback_on_failure: true,
        }
    }
}

/// Runs a list of [`UploadConfig`] slots against the files of one request.
#[derive(Clone)]
pub struct UploadOrchestrator {
    storage: Arc<dyn Storage>,
    configs: Vec<UploadConfig>,
    options: UploadOptions,
}

/// A validated file with its derivatives not yet scheduled.
struct PlannedFile {
    slot: usize,
    config: UploadConfig,
    file: FormFile,
    extension: String,
    artifact_id: Uuid,
    derivatives: Vec<Derivative>,
}

/// One (file, derivative) unit of work.
struct UploadTask {
    slot: usize,
    field_name: String,
    original_file_name: String,
    artifact_id: Uuid,
    extension: String,
    derivative: Derivative,
    thumbnail_width: u32,
    storage_key: String,
    data: Bytes,
}

/// State shared by the tasks of one run.
struct RunContext {
    storage: Arc<dyn Storage>,
    cancel: CancellationToken,
    permits: Arc<Semaphore>,
    artifacts: Mutex<Vec<(usize, UploadedArtifact)>>,
    stored_keys: Mutex<Vec<String>>,
}

impl UploadOrchestrator {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            configs: Vec::new(),
            options: UploadOptions::default(),
        }
    }

    pub fn with_options(mut self, options: UploadOptions) -> Self {
        self.options = UploadOptions {
            max_concurrency: options.max_concurrency.max(1),
            ..options
        };
        self
    }

    /// Default config to start a slot from
    pub fn config() -> UploadConfig {
        UploadConfig::default()
    }

    /// Copy of this orchestrator with one more slot
    pub fn push(&self, config: UploadConfig) -> Self {
        let mut next = self.clone();
        next.configs.push(config);
        next
    }

    pub fn configs(&self) -> &[UploadConfig] {
        &self.configs
    }

    pub fn options(&self) -> UploadOptions {
        self.options
    }

    /// Store every configured file present in `files` together with its derivatives.
    ///
    /// Fields without a file are skipped. Validation happens before anything is
    /// written. The first failing task cancels the rest and its error is returned;
    /// with `rollback_on_failure` the objects already stored are then deleted.
    pub async fn run(&self, files: &FormFiles) -> Result<UploadedFiles, UploadError> {
        if self.configs.is_empty() {
            tracing::info!("No upload configuration, skipping upload");
            return Ok(UploadedFiles::default());
        }

        let planned = self.plan(files)?;
        if planned.is_empty() {
            tracing::debug!("No configured upload field had a file");
            return Ok(UploadedFiles::default());
        }

        let start = Instant::now();
        let ctx = Arc::new(RunContext {
            storage: self.storage.clone(),
            cancel: CancellationToken::new(),
            permits: Arc::new(Semaphore::new(self.options.max_concurrency)),
            artifacts: Mutex::new(Vec::with_capacity(planned.len())),
            stored_keys: Mutex::new(Vec::new()),
        });

        let mut join_set = JoinSet::new();
        let mut task_count = 0usize;
        for file in planned {
            for task in file.into_tasks() {
                task_count += 1;
                join_set.spawn(run_task(ctx.clone(), task));
            }
        }

        let mut first_error: Option<UploadError> = None;
        while let Some(joined) = join_set.join_next().await {
            let outcome = joined.unwrap_or_else(|e| Err(UploadError::TaskFailed(e.to_string())));
            if let Err(e) = outcome {
                if first_error.is_none() {
                    tracing::warn!(error = %e, "Upload task failed, cancelling remaining tasks");
                    ctx.cancel.cancel();
                    first_error = Some(e);
                } else {
                    tracing::debug!(error = %e, "Ignoring error from cancelled upload run");
                }
            }
        }

        if let Some(error) = first_error {
            if self.options.rollback_on_failure {
                rollback(&ctx).await;
            }
            return Err(error);
        }

        let mut artifacts = std::mem::take(&mut *ctx.artifacts.lock().await);
        artifacts.sort_by_key(|(slot, _)| *slot);

        tracing::info!(
            files = artifacts.len(),
            tasks = task_count,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload completed"
        );

        Ok(UploadedFiles::new(
            artifacts.into_iter().map(|(_, artifact)| artifact).collect(),
        ))
    }

    /// Validate every present file before anything is scheduled
    fn plan(&self, files: &FormFiles) -> Result<Vec<PlannedFile>, UploadError> {
        let mut planned = Vec::new();

        for (slot, config) in self.configs.iter().enumerate() {
            let Some(file) = files.get(config.field_name()) else {
                tracing::debug!(field = %config.field_name(), "No file for upload field, skipping");
                continue;
            };

            let extension = file.extension().to_string();
            if !config.allows(&extension) {
                return Err(UploadError::ExtensionMismatch {
                    field: config.field_name().to_string(),
                    extension,
                });
            }

            let is_image = ImageKind::from_extension(&extension).is_some();
            if config.thumbnail_enabled() && !is_image {
                return Err(UploadError::ThumbnailExtensionMismatch {
                    field: config.field_name().to_string(),
                    extension,
                });
            }

            planned.push(PlannedFile {
                slot,
                derivatives: Derivative::plan(
                    is_image,
                    config.webp_enabled(),
                    config.thumbnail_enabled(),
                ),
                config: config.clone(),
                file: file.clone(),
                extension,
                artifact_id: Uuid::new_v4(),
            });
        }

        Ok(planned)
    }
}

impl PlannedFile {
    fn into_tasks(self) -> Vec<UploadTask> {
        let PlannedFile {
            slot,
            config,
            file,
            extension,
            artifact_id,
            derivatives,
        } = self;

        derivatives
            .into_iter()
            .map(|derivative| UploadTask {
                slot,
                field_name: config.field_name().to_string(),
                original_file_name: file.file_name.clone(),
                artifact_id,
                storage_key: storage_key(
                    config.storage_prefix(),
                    &derivative.file_name(artifact_id, &extension),
                ),
                extension: extension.clone(),
                derivative,
                thumbnail_width: config.thumbnail_width_px(),
                data: file.data.clone(),
            })
            .collect()
    }
}

async fn run_task(ctx: Arc<RunContext>, task: UploadTask) -> Result<(), UploadError> {
    let _permit = tokio::select! {
        _ = ctx.cancel.cancelled() => return Ok(()),
        permit = ctx.permits.clone().acquire_owned() => {
            permit.map_err(|e| UploadError::TaskFailed(e.to_string()))?
        }
    };

    if ctx.cancel.is_cancelled() {
        return Ok(());
    }

    let size_bytes = task.data.len() as u64;
    let payload = match task.derivative.variant_spec(task.thumbnail_width) {
        None => task.data.clone(),
        Some(spec) => {
            let data = task.data.clone();
            let extension = task.extension.clone();
            let rendered = tokio::task::spawn_blocking(move || {
                render_variant(&data, &extension, spec)
            })
            .await
            .map_err(|e| UploadError::TaskFailed(e.to_string()))??;
            Bytes::from(rendered)
        }
    };

    if ctx.cancel.is_cancelled() {
        tracing::debug!(key = %task.storage_key, "Upload cancelled before storage write");
        return Ok(());
    }

    let stored = ctx
        .storage
        .upload(
            &task.storage_key,
            payload,
            content_type_for_key(&task.storage_key),
        )
        .await?;

    ctx.stored_keys.lock().await.push(stored.key.clone());

    tracing::debug!(
        field = %task.field_name,
        derivative = task.derivative.as_str(),
        key = %stored.key,
        size_bytes = stored.size_bytes,
        "Stored upload derivative"
    );

    if task.derivative == Derivative::Original {
        ctx.artifacts.lock().await.push((
            task.slot,
            UploadedArtifact {
                field_name: task.field_name,
                original_file_name: task.original_file_name,
                storage_key: task.storage_key,
                artifact_id: task.artifact_id,
                size_bytes,
                storage_response: stored,
            },
        ));
    }

    Ok(())
}

/// Best-effort delete of everything a failed run stored
async fn rollback(ctx: &RunContext) {
    let keys = std::mem::take(&mut *ctx.stored_keys.lock().await);
    if keys.is_empty() {
        return;
    }

    tracing::info!(objects = keys.len(), "Rolling back stored upload objects");

    let deletes = keys.iter().map(|key| async move {
        if let Err(e) = ctx.storage.delete(key).await {
            tracing::warn!(error = %e, key = %key, "Failed to delete object during rollback");
        }
    });
    futures::future::join_all(deletes).await;
}
