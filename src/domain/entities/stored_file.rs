use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A file accepted by the upload validator and written to disk.
///
/// The name is `{id}{extension}`; neither part derives from client input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    id: Uuid,
    path: PathBuf,
    content_type: String,
    extension: String,
    size_bytes: u64,
}

impl StoredFile {
    pub fn new(
        id: Uuid,
        path: PathBuf,
        content_type: impl Into<String>,
        extension: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            id,
            path,
            content_type: content_type.into(),
            extension: extension.into(),
            size_bytes,
        }
    }

    /// Generated filename for an id and extension
    pub fn file_name_for(id: &Uuid, extension: &str) -> String {
        format!("{}{}", id, extension)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Canonical absolute path of the stored file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        Self::file_name_for(&self.id, &self.extension)
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}
