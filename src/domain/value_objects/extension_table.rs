use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::domain::errors::DomainError;
use crate::domain::validation::Validation;

/// Extension used for accepted content types without a table entry
pub const DEFAULT_EXTENSION: &str = ".bin";

static BUILTIN_EXTENSIONS: Lazy<ExtensionTable> = Lazy::new(|| ExtensionTable {
    entries: HashMap::from([
        ("image/jpeg".to_string(), ".jpg".to_string()),
        ("image/png".to_string(), ".png".to_string()),
        ("application/pdf".to_string(), ".pdf".to_string()),
    ]),
});

/// Content type -> stored file extension.
///
/// The extension of a stored file is always taken from this table, never
/// from the client supplied filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionTable {
    entries: HashMap<String, String>,
}

impl ExtensionTable {
    pub fn new(entries: HashMap<String, String>) -> Result<Self, DomainError> {
        for (content_type, extension) in &entries {
            if !Validation::validate_extension(extension) {
                return Err(DomainError::InvalidExtension {
                    content_type: content_type.clone(),
                    extension: extension.clone(),
                });
            }
        }

        Ok(Self { entries })
    }

    pub fn builtin() -> Self {
        BUILTIN_EXTENSIONS.clone()
    }

    pub fn extension_for(&self, content_type: &str) -> &str {
        self.entries
            .get(content_type)
            .map(String::as_str)
            .unwrap_or(DEFAULT_EXTENSION)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ExtensionTable {
    fn default() -> Self {
        Self::builtin()
    }
}
