use async_trait::async_trait;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::{CoverStore, UploadError, UploadReader};
use crate::domain::entities::StoredFile;
use crate::domain::value_objects::UploadPolicy;
use crate::infrastructure::storage::{BoundedRead, PathGuard};

/// Prefix of in-flight temp files inside the upload directory
const TEMP_PREFIX: &str = ".upload-";

/// A file that reached its final name. Unless kept, it is removed again
/// when dropped; that happens when the request was cancelled while the
/// write was in flight on the blocking pool.
struct CommittedUpload {
    path: PathBuf,
    keep: bool,
}

impl CommittedUpload {
    fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    fn keep(mut self) {
        self.keep = true;
    }
}

impl Drop for CommittedUpload {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        let path = std::mem::take(&mut self.path);
        // Never unlink on an async worker thread
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || remove_abandoned(&path));
            }
            Err(_) => remove_abandoned(&path),
        }
    }
}

fn remove_abandoned(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Removed abandoned upload {:?}", path),
        Err(e) => warn!("Failed to remove abandoned upload {:?}: {}", path, e),
    }
}

/// Write `data` to a temp file next to `path`, then move it to `path`
/// without replacing anything already there. Runs on the blocking pool;
/// the temp file is deleted on every failure.
fn write_exclusive(
    path: &Path,
    data: &[u8],
    durable: bool,
) -> Result<CommittedUpload, UploadError> {
    let dir = path
        .parent()
        .ok_or_else(|| UploadError::PathTraversal { path: path.to_path_buf() })?;

    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".part")
        .tempfile_in(dir)?;
    temp.write_all(data)?;
    temp.flush()?;
    if durable {
        temp.as_file().sync_all()?;
    }

    temp.persist_noclobber(path).map_err(|e| UploadError::Io(e.error))?;
    let committed = CommittedUpload::new(path.to_path_buf());

    // Persist the directory entry as well; the file itself is complete
    if durable {
        match File::open(dir) {
            Ok(dir) => {
                if let Err(e) = dir.sync_all() {
                    warn!("Failed to sync upload directory: {}", e);
                }
            }
            Err(e) => warn!("Failed to open upload directory for sync: {}", e),
        }
    }

    Ok(committed)
}

/// Upload validator and writer for a local directory.
///
/// Holds only immutable state, so one instance is shared by all requests.
pub struct SecureFileStore {
    upload_dir: PathBuf,
    policy: Arc<UploadPolicy>,
    durable_writes: bool,
}

impl SecureFileStore {
    pub fn new(upload_dir: PathBuf, policy: UploadPolicy) -> Self {
        Self::with_durability(upload_dir, policy, true)
    }

    pub fn with_durability(upload_dir: PathBuf, policy: UploadPolicy, durable_writes: bool) -> Self {
        Self {
            upload_dir,
            policy: Arc::new(policy),
            durable_writes,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Check at startup that the configured directory resolves
    pub async fn verify(&self) -> Result<PathBuf, UploadError> {
        PathGuard::canonical_dir(&self.upload_dir).await
    }

    /// Run the full pipeline against an explicit directory. Each step is a
    /// hard gate; nothing touches the disk before the final write.
    pub async fn store_in(
        &self,
        upload_dir: &Path,
        reader: UploadReader,
    ) -> Result<StoredFile, UploadError> {
        // 1. Bounded read
        let data = BoundedRead::read_to_limit(reader, self.policy.max_size()).await?;

        // 2. Content sniffing, client metadata is never consulted
        let (content_type, extension) = self
            .policy
            .classify(&data)
            .ok_or(UploadError::InvalidFileType)?;

        // 3. Directory canonicalization
        let canonical_dir = PathGuard::canonical_dir(upload_dir).await?;

        // 4. Name generation
        let id = Uuid::new_v4();
        let file_name = StoredFile::file_name_for(&id, extension);

        // 5. Containment
        let candidate = PathGuard::resolve_candidate(&canonical_dir, &file_name).await?;
        PathGuard::ensure_contained(&canonical_dir, &candidate)?;

        // 6. Symlinks in ancestry
        PathGuard::ensure_no_symlinks(upload_dir, &candidate).await?;

        // 7. Write
        debug!("Writing upload to {:?}", candidate);
        let size_bytes = data.len() as u64;
        self.write_new_file(&candidate, data).await?;

        Ok(StoredFile::new(
            id,
            candidate,
            content_type,
            extension,
            size_bytes,
        ))
    }

    /// Create `path` exclusively and write `data` to it. Any failure
    /// leaves nothing behind, and so does cancelling the request at any
    /// point before this returns.
    async fn write_new_file(&self, path: &Path, data: Vec<u8>) -> Result<(), UploadError> {
        let target = path.to_path_buf();
        let durable = self.durable_writes;

        let committed =
            tokio::task::spawn_blocking(move || write_exclusive(&target, &data, durable))
                .await
                .map_err(|e| UploadError::Io(std::io::Error::other(e)))??;

        // No await between here and the caller seeing Ok
        committed.keep();
        Ok(())
    }

    /// Remove a stored file; used by tooling and tests
    pub async fn remove(&self, stored: &StoredFile) -> Result<(), UploadError> {
        fs::remove_file(stored.path()).await?;
        Ok(())
    }
}

#[async_trait]
impl CoverStore for SecureFileStore {
    async fn store(&self, reader: UploadReader) -> Result<StoredFile, UploadError> {
        self.store_in(&self.upload_dir, reader).await
    }
}
