use magazine_storage::StoredObject;
use serde::Serialize;
use uuid::Uuid;

/// Metadata of one stored source file.
///
/// Derivatives share `artifact_id` with their source and are not listed separately.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedArtifact {
    pub field_name: String,
    pub original_file_name: String,
    pub storage_key: String,
    pub artifact_id: Uuid,
    pub size_bytes: u64,
    pub storage_response: StoredObject,
}

/// Artifacts stored for a request, in configuration order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct UploadedFiles(Vec<UploadedArtifact>);

impl UploadedFiles {
    pub fn new(artifacts: Vec<UploadedArtifact>) -> Self {
        Self(artifacts)
    }

    /// Artifact stored for `field_name`, if that field had a file
    pub fn get_file(&self, field_name: &str) -> Option<&UploadedArtifact> {
        self.0.iter().find(|a| a.field_name == field_name)
    }

    pub fn first(&self) -> Option<&UploadedArtifact> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UploadedArtifact> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<UploadedArtifact> {
        self.0
    }
}
