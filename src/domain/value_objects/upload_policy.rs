use crate::domain::errors::DomainError;

use super::{ExtensionTable, SignatureTable};

/// Default size ceiling: 10 MB
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 10_000_000;

/// Everything the upload validator enforces: the size ceiling, the
/// signatures it accepts and the extensions it stores them under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    max_size: u64,
    signatures: SignatureTable,
    extensions: ExtensionTable,
}

impl UploadPolicy {
    pub fn new(
        max_size: u64,
        signatures: SignatureTable,
        extensions: ExtensionTable,
    ) -> Result<Self, DomainError> {
        if max_size == 0 {
            return Err(DomainError::ZeroSizeCeiling);
        }

        Ok(Self {
            max_size,
            signatures,
            extensions,
        })
    }

    /// Replace the size ceiling, keeping the tables
    pub fn with_max_size(self, max_size: u64) -> Result<Self, DomainError> {
        Self::new(max_size, self.signatures, self.extensions)
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn signatures(&self) -> &SignatureTable {
        &self.signatures
    }

    pub fn extensions(&self) -> &ExtensionTable {
        &self.extensions
    }

    /// Sniff `data` and return `(content_type, extension)` for an accepted file
    pub fn classify(&self, data: &[u8]) -> Option<(&str, &str)> {
        let content_type = self.signatures.sniff(data)?;
        Some((content_type, self.extensions.extension_for(content_type)))
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_UPLOAD_SIZE,
            signatures: SignatureTable::builtin(),
            extensions: ExtensionTable::builtin(),
        }
    }
}
