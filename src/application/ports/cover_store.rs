use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::path::PathBuf;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::domain::entities::StoredFile;

/// Type alias for the incoming upload byte stream
pub type UploadReader = Pin<Box<dyn AsyncRead + Send>>;

/// Classified failures of the upload pipeline.
///
/// Security variants carry the offending path for server-side logs; it
/// must never be rendered to the client.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("file_too_large: upload exceeds {max_size} bytes")]
    FileTooLarge { max_size: u64 },

    #[error("invalid_file_type: content matches no accepted signature")]
    InvalidFileType,

    #[error("path_traversal_attempt: {} escapes the upload directory", .path.display())]
    PathTraversal { path: PathBuf },

    #[error("symlink_in_path: {} is a symbolic link", .path.display())]
    SymlinkInPath { path: PathBuf },

    #[error("failed to read upload: {0}")]
    Read(#[source] std::io::Error),

    #[error("upload directory {} is unavailable: {source}", .path.display())]
    UploadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stable, matchable kind of an [`UploadError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadErrorKind {
    FileTooLarge,
    InvalidFileType,
    PathTraversalAttempt,
    SymlinkInPath,
    ReadFailed,
    UploadDirectoryUnavailable,
    IoError,
}

/// Who is responsible for a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Expected, user-correctable
    Policy,
    /// Malicious client or misconfigured deployment
    Security,
    /// The client's byte stream broke off
    Client,
    /// Server-side fault
    Operational,
}

impl UploadErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadErrorKind::FileTooLarge => "file_too_large",
            UploadErrorKind::InvalidFileType => "invalid_file_type",
            UploadErrorKind::PathTraversalAttempt => "path_traversal_attempt",
            UploadErrorKind::SymlinkInPath => "symlink_in_path",
            UploadErrorKind::ReadFailed => "read_failed",
            UploadErrorKind::UploadDirectoryUnavailable => "upload_directory_unavailable",
            UploadErrorKind::IoError => "io_error",
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            UploadErrorKind::FileTooLarge | UploadErrorKind::InvalidFileType => ErrorClass::Policy,
            UploadErrorKind::PathTraversalAttempt | UploadErrorKind::SymlinkInPath => {
                ErrorClass::Security
            }
            UploadErrorKind::ReadFailed => ErrorClass::Client,
            UploadErrorKind::UploadDirectoryUnavailable | UploadErrorKind::IoError => {
                ErrorClass::Operational
            }
        }
    }
}

impl std::fmt::Display for UploadErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl UploadError {
    pub fn kind(&self) -> UploadErrorKind {
        match self {
            UploadError::FileTooLarge { .. } => UploadErrorKind::FileTooLarge,
            UploadError::InvalidFileType => UploadErrorKind::InvalidFileType,
            UploadError::PathTraversal { .. } => UploadErrorKind::PathTraversalAttempt,
            UploadError::SymlinkInPath { .. } => UploadErrorKind::SymlinkInPath,
            UploadError::Read(_) => UploadErrorKind::ReadFailed,
            UploadError::UploadDirectory { .. } => UploadErrorKind::UploadDirectoryUnavailable,
            UploadError::Io(_) => UploadErrorKind::IoError,
        }
    }

    pub fn class(&self) -> ErrorClass {
        self.kind().class()
    }
}

/// Port for validating and persisting an uploaded cover file
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CoverStore: Send + Sync {
    /// Validate the stream and store it under a generated name.
    /// On any error no file is left behind.
    async fn store(&self, reader: UploadReader) -> Result<StoredFile, UploadError>;
}
