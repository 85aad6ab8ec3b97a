use tokio::io::{AsyncRead, AsyncReadExt};

use crate::application::ports::UploadError;

/// Initial buffer capacity; the buffer grows only as data actually arrives
const INITIAL_CAPACITY: usize = 64 * 1024;

/// Reads an upload stream of unknown length without ever holding more than
/// `max_size + 1` bytes.
pub struct BoundedRead;

impl BoundedRead {
    /// Read at most `max_size + 1` bytes. Getting the extra byte is how an
    /// oversize stream is detected without trusting a declared length.
    ///
    /// Dropping the returned future discards whatever was buffered.
    pub async fn read_to_limit(
        reader: impl AsyncRead + Unpin,
        max_size: u64,
    ) -> Result<Vec<u8>, UploadError> {
        let limit = max_size.saturating_add(1);
        let capacity = usize::try_from(limit)
            .unwrap_or(usize::MAX)
            .min(INITIAL_CAPACITY);
        let mut buffer = Vec::with_capacity(capacity);

        reader
            .take(limit)
            .read_to_end(&mut buffer)
            .await
            .map_err(UploadError::Read)?;

        if buffer.len() as u64 > max_size {
            return Err(UploadError::FileTooLarge { max_size });
        }

        Ok(buffer)
    }
}
