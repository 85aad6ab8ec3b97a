use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, State,
    },
    response::Json,
};
use bytes::Bytes;
use futures_util::stream;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;
use tracing::debug;

use crate::api::errors::{ApiError, ProblemDetails};
use crate::application::dto::UploadResponse;
use crate::application::ports::UploadReader;
use crate::application::use_cases::UploadCoverUseCase;

/// Multipart field carrying the file
pub const FILE_FIELD: &str = "file";

/// Chunks buffered between the multipart parser and the store
const PUMP_CAPACITY: usize = 8;

/// POST /upload-cover
/// Upload a cover image or PDF. The stored type is decided by the file
/// content; the declared filename and content type are ignored.
#[utoipa::path(
    post,
    path = "/upload-cover",
    tag = "uploads",
    request_body(content_type = "multipart/form-data", description = "Form with a `file` field"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Upload rejected", body = ProblemDetails),
        (status = 413, description = "File too large", body = ProblemDetails),
        (status = 415, description = "Unsupported file type", body = ProblemDetails),
        (status = 422, description = "No file field", body = ProblemDetails),
        (status = 500, description = "Upload directory unavailable", body = ProblemDetails)
    )
)]
pub async fn upload_cover_handler(
    State(use_case): State<Arc<UploadCoverUseCase>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;

    // The first field named `file`, or else the first field carrying a filename
    while let Some(field) = multipart.next_field().await? {
        if is_file_field(&field) {
            return store_field(&use_case, field).await;
        }
    }

    Err(ApiError::validation("Missing file field 'file'"))
}

async fn store_field(
    use_case: &UploadCoverUseCase,
    field: Field<'_>,
) -> Result<Json<UploadResponse>, ApiError> {
    debug!(
        field = field.name().unwrap_or_default(),
        declared_filename = field.file_name().unwrap_or_default(),
        declared_content_type = field.content_type().unwrap_or_default(),
        "upload_field_received"
    );

    let (tx, rx) = mpsc::channel::<std::io::Result<Bytes>>(PUMP_CAPACITY);
    let (_, result) = tokio::join!(pump_field(field, tx), use_case.execute(channel_reader(rx)));

    Ok(Json(result?))
}

fn is_file_field(field: &Field<'_>) -> bool {
    field.name() == Some(FILE_FIELD) || field.file_name().is_some()
}

/// Forward field chunks until the body ends, the reader goes away or the
/// multipart stream fails. Failures are forwarded as errors so a broken
/// body is never mistaken for the end of the file.
async fn pump_field(mut field: Field<'_>, tx: mpsc::Sender<std::io::Result<Bytes>>) {
    loop {
        let item = match field.chunk().await {
            Ok(Some(chunk)) => Ok(chunk),
            Ok(None) => return,
            Err(e) => Err(std::io::Error::other(e)),
        };
        let failed = item.is_err();
        if tx.send(item).await.is_err() || failed {
            return;
        }
    }
}

fn channel_reader(rx: mpsc::Receiver<std::io::Result<Bytes>>) -> UploadReader {
    let chunks = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|item| (item, rx))
    });
    Box::pin(StreamReader::new(chunks))
}
