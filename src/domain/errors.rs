use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error in field '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Invalid content signature for {content_type}: {reason}")]
    InvalidSignature {
        content_type: String,
        reason: String,
    },

    #[error("Invalid file extension '{extension}' for {content_type}")]
    InvalidExtension {
        content_type: String,
        extension: String,
    },

    #[error("Upload size ceiling must be greater than zero")]
    ZeroSizeCeiling,
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
