use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::errors::{ItemUseCaseError, QuoteUseCaseError};
use crate::application::ports::{ErrorClass, UploadError};
use crate::domain::errors::DomainError;

pub const PROBLEM_JSON: &str = "application/problem+json";

/// Instance used when an error is rendered outside a request context
pub const DEFAULT_INSTANCE: &str = "about:blank";

/// Problem-details body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub correlation_id: String,
    pub instance: String,
}

/// API error response
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    problem_type: &'static str,
    title: &'static str,
    detail: String,
}

impl ApiError {
    fn new(
        status: StatusCode,
        problem_type: &'static str,
        title: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            status,
            problem_type,
            title,
            detail: detail.into(),
        }
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "/errors/validation",
            "Validation Failed",
            detail,
        )
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "/errors/not-found", "Not Found", detail)
    }

    pub fn file_too_large(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "/errors/file-too-large",
            "Payload Too Large",
            detail,
        )
    }

    pub fn unsupported_media_type(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "/errors/unsupported-media-type",
            "Unsupported Media Type",
            detail,
        )
    }

    pub fn upload_rejected(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "/errors/upload-rejected",
            "Upload Rejected",
            detail,
        )
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "/errors/bad-request",
            "Bad Request",
            detail,
        )
    }

    pub fn method_not_allowed(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "/errors/method-not-allowed",
            "Method Not Allowed",
            detail,
        )
    }

    /// Internal failures never carry the underlying error text
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "/errors/internal",
            "Internal Server Error",
            "An internal error occurred",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn to_problem(&self, correlation_id: String, instance: String) -> ProblemDetails {
        ProblemDetails {
            problem_type: self.problem_type.to_string(),
            title: self.title.to_string(),
            status: self.status.as_u16(),
            detail: self.detail.clone(),
            correlation_id,
            instance,
        }
    }
}

/// Render a problem as an `application/problem+json` response
pub fn problem_response(problem: ProblemDetails) -> Response {
    let status =
        StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::to_vec(&problem).unwrap_or_default();

    let mut response = (status, body).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
    response.extensions_mut().insert(problem);
    response
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The problem-details middleware replaces both with request values
        problem_response(self.to_problem(Uuid::new_v4().to_string(), DEFAULT_INSTANCE.to_string()))
    }
}

// Convert use case errors to API errors

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match &err {
            UploadError::FileTooLarge { max_size } => ApiError::file_too_large(format!(
                "File too large. Maximum size is {} bytes",
                max_size
            )),
            UploadError::InvalidFileType => ApiError::unsupported_media_type(
                "Invalid file type. File content does not match an accepted type",
            ),
            UploadError::Read(io) => match multipart_status(io) {
                Some(StatusCode::PAYLOAD_TOO_LARGE) => {
                    ApiError::file_too_large("File too large for the upload limit")
                }
                _ => ApiError::bad_request("Failed to read upload body"),
            },
            _ => match err.class() {
                ErrorClass::Security => ApiError::upload_rejected("The upload could not be accepted"),
                _ => ApiError::internal_error(),
            },
        }
    }
}

/// Status of a multipart failure hidden inside a streamed read error
fn multipart_status(err: &std::io::Error) -> Option<StatusCode> {
    err.get_ref()
        .and_then(|inner| inner.downcast_ref::<MultipartError>())
        .map(MultipartError::status)
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError { message, .. } => ApiError::validation(message),
            other => ApiError::validation(other.to_string()),
        }
    }
}

impl From<ItemUseCaseError> for ApiError {
    fn from(err: ItemUseCaseError) -> Self {
        match err {
            ItemUseCaseError::Domain(e) => e.into(),
            ItemUseCaseError::NotFound(_) => ApiError::not_found("Item not found"),
            ItemUseCaseError::Repository(e) => {
                tracing::error!(error = %e, "item_repository_failed");
                ApiError::internal_error()
            }
        }
    }
}

impl From<QuoteUseCaseError> for ApiError {
    fn from(err: QuoteUseCaseError) -> Self {
        match err {
            QuoteUseCaseError::Domain(e) => e.into(),
            QuoteUseCaseError::NotFound(_) => ApiError::not_found("Quote not found"),
            QuoteUseCaseError::BookNotFound(book) => {
                ApiError::not_found(format!("No quotes found for book: {}", book))
            }
            QuoteUseCaseError::Repository(e) => {
                tracing::error!(error = %e, "quote_repository_failed");
                ApiError::internal_error()
            }
        }
    }
}

// Convert extractor rejections to API errors

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::file_too_large("File too large for the upload limit")
        } else {
            ApiError::bad_request(err.body_text())
        }
    }
}
