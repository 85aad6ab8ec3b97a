use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::dto::UploadResponse;
use crate::application::ports::{CoverStore, ErrorClass, UploadError, UploadReader};

/// Use case: validate and store an uploaded cover file
pub struct UploadCoverUseCase {
    store: Arc<dyn CoverStore>,
}

impl UploadCoverUseCase {
    pub fn new(store: Arc<dyn CoverStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, reader: UploadReader) -> Result<UploadResponse, UploadError> {
        match self.store.store(reader).await {
            Ok(stored) => {
                info!(
                    file_id = %stored.id(),
                    content_type = stored.content_type(),
                    size_bytes = stored.size_bytes(),
                    "cover_uploaded"
                );
                Ok(UploadResponse::from(&stored))
            }
            Err(e) => {
                let kind = e.kind();
                match e.class() {
                    // Full detail stays in the server log
                    ErrorClass::Security => error!(kind = %kind, error = %e, "upload_security_violation"),
                    ErrorClass::Operational => error!(kind = %kind, error = %e, "upload_failed"),
                    ErrorClass::Policy | ErrorClass::Client => {
                        warn!(kind = %kind, error = %e, "upload_rejected")
                    }
                }
                Err(e)
            }
        }
    }
}
