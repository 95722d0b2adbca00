//! Multipart file parts, keyed by form field.

use bytes::Bytes;
use std::collections::HashMap;

/// One file part read from a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFile {
    pub file_name: String,
    pub data: Bytes,
}

impl FormFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Dot-prefixed extension of the file name, or `""` when there is none.
    ///
    /// Only the last path segment is considered, so `a.b/c` has no extension.
    pub fn extension(&self) -> &str {
        let base = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_name);
        match base.rfind('.') {
            Some(idx) => &base[idx..],
            None => "",
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

/// File parts of a request by field name.
#[derive(Debug, Clone, Default)]
pub struct FormFiles {
    files: HashMap<String, FormFile>,
}

impl FormFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file; the first part for a field wins.
    ///
    /// Returns `false` when the field already had a file.
    pub fn insert(&mut self, field_name: impl Into<String>, file: FormFile) -> bool {
        use std::collections::hash_map::Entry;

        match self.files.entry(field_name.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(file);
                true
            }
        }
    }

    /// Builder form of [`FormFiles::insert`]
    pub fn with(mut self, field_name: impl Into<String>, file: FormFile) -> Self {
        self.insert(field_name, file);
        self
    }

    pub fn get(&self, field_name: &str) -> Option<&FormFile> {
        self.files.get(field_name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
