use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::application::ports::UploadError;

/// Path checks that keep stored files inside the upload directory
pub struct PathGuard;

impl PathGuard {
    /// Resolve the upload directory to its canonical, symlink-free form.
    /// The directory must already exist; it is never created here.
    pub async fn canonical_dir(upload_dir: &Path) -> Result<PathBuf, UploadError> {
        let unavailable = |source: io::Error| UploadError::UploadDirectory {
            path: upload_dir.to_path_buf(),
            source,
        };

        let canonical = fs::canonicalize(upload_dir).await.map_err(unavailable)?;
        let metadata = fs::metadata(&canonical).await.map_err(unavailable)?;
        if !metadata.is_dir() {
            return Err(unavailable(io::Error::other("not a directory")));
        }

        Ok(canonical)
    }

    /// Join a generated file name onto the canonical directory and resolve
    /// the parent again, so a directory swapped after canonicalization
    /// shows up as a different location.
    pub async fn resolve_candidate(
        canonical_dir: &Path,
        file_name: &str,
    ) -> Result<PathBuf, UploadError> {
        let candidate = canonical_dir.join(file_name);

        let parent = candidate.parent().ok_or_else(|| UploadError::PathTraversal {
            path: candidate.clone(),
        })?;
        let name = candidate.file_name().ok_or_else(|| UploadError::PathTraversal {
            path: candidate.clone(),
        })?;

        let resolved_parent = fs::canonicalize(parent).await?;
        Ok(resolved_parent.join(name))
    }

    /// The candidate must be a direct child of the canonical directory.
    /// Comparison is per path component, so `/data2/x` is not inside `/data`.
    pub fn ensure_contained(canonical_dir: &Path, candidate: &Path) -> Result<(), UploadError> {
        let is_child = candidate.parent() == Some(canonical_dir)
            && candidate.starts_with(canonical_dir)
            && matches!(candidate.components().next_back(), Some(Component::Normal(_)));

        if is_child {
            Ok(())
        } else {
            Err(UploadError::PathTraversal {
                path: candidate.to_path_buf(),
            })
        }
    }

    /// Fail if any ancestor of the candidate, or any ancestor of the upload
    /// directory as it was configured, is a symbolic link.
    ///
    /// The configured directory itself may be a link (it is resolved once,
    /// strictly); the components above it may not.
    pub async fn ensure_no_symlinks(
        configured_dir: &Path,
        candidate: &Path,
    ) -> Result<(), UploadError> {
        for ancestor in candidate.ancestors().skip(1) {
            Self::reject_symlink(ancestor).await?;
        }

        let configured = Self::absolute(configured_dir)?;
        for ancestor in configured.ancestors().skip(1) {
            Self::reject_symlink(ancestor).await?;
        }

        Ok(())
    }

    async fn reject_symlink(path: &Path) -> Result<(), UploadError> {
        if path.as_os_str().is_empty() {
            return Ok(());
        }

        let metadata = fs::symlink_metadata(path).await?;
        if metadata.file_type().is_symlink() {
            debug!("Symlink found in upload path: {:?}", path);
            return Err(UploadError::SymlinkInPath {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }

    fn absolute(path: &Path) -> Result<PathBuf, UploadError> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(std::env::current_dir()?.join(path))
        }
    }
}
