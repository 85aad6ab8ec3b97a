use axum::{
    extract::DefaultBodyLimit,
    http::header,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{sensitive_headers::SetSensitiveRequestHeadersLayer, trace::TraceLayer};

use crate::api::errors::ApiError;
use crate::api::handlers::{
    create_item_handler, create_quote_handler, delete_quote_handler, get_item_handler,
    get_quote_handler, health_handler, list_quotes_by_book_handler, list_quotes_handler,
    upload_cover_handler,
};
use crate::api::middleware::{problem_details_middleware, request_tracing_middleware};
use crate::api::openapi::swagger_ui;
use crate::application::use_cases::{
    CreateItemUseCase, CreateQuoteUseCase, DeleteQuoteUseCase, GetItemUseCase, GetQuoteUseCase,
    ListQuotesByBookUseCase, ListQuotesUseCase, UploadCoverUseCase,
};

/// Room for multipart boundaries and part headers on top of the file itself
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Application state container
pub struct AppState {
    pub upload_use_case: Arc<UploadCoverUseCase>,
    pub create_item_use_case: Arc<CreateItemUseCase>,
    pub get_item_use_case: Arc<GetItemUseCase>,
    pub list_quotes_use_case: Arc<ListQuotesUseCase>,
    pub get_quote_use_case: Arc<GetQuoteUseCase>,
    pub list_quotes_by_book_use_case: Arc<ListQuotesByBookUseCase>,
    pub create_quote_use_case: Arc<CreateQuoteUseCase>,
    pub delete_quote_use_case: Arc<DeleteQuoteUseCase>,
    /// Size ceiling of the upload policy, used for the body limit
    pub max_upload_bytes: u64,
}

/// Body limit for the upload route: the file ceiling plus multipart framing
pub fn upload_body_limit(max_upload_bytes: u64) -> usize {
    usize::try_from(max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES)
}

async fn not_found_fallback() -> ApiError {
    ApiError::not_found("Resource not found")
}

async fn method_not_allowed_fallback() -> ApiError {
    ApiError::method_not_allowed("Method not allowed for this resource")
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/upload-cover",
            post(upload_cover_handler)
                .with_state(state.upload_use_case)
                .layer(DefaultBodyLimit::max(upload_body_limit(
                    state.max_upload_bytes,
                ))),
        )
        .route(
            "/items",
            post(create_item_handler).with_state(state.create_item_use_case),
        )
        .route(
            "/items/{id}",
            get(get_item_handler).with_state(state.get_item_use_case),
        )
        .route(
            "/quotes",
            get(list_quotes_handler)
                .with_state(state.list_quotes_use_case)
                .merge(post(create_quote_handler).with_state(state.create_quote_use_case)),
        )
        .route(
            "/quotes/{id}",
            get(get_quote_handler)
                .with_state(state.get_quote_use_case)
                .merge(
                    axum::routing::delete(delete_quote_handler)
                        .with_state(state.delete_quote_use_case),
                ),
        )
        .route(
            "/quotes/book/{book}",
            get(list_quotes_by_book_handler).with_state(state.list_quotes_by_book_use_case),
        )
        .merge(swagger_ui())
        .method_not_allowed_fallback(method_not_allowed_fallback)
        .fallback(not_found_fallback)
        // Outermost first: problem stamping reads the request id set above it
        .layer(
            ServiceBuilder::new()
                .layer(SetSensitiveRequestHeadersLayer::new([
                    header::AUTHORIZATION,
                    header::COOKIE,
                ]))
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(request_tracing_middleware))
                .layer(axum_middleware::from_fn(problem_details_middleware)),
        )
}
