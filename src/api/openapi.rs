use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::errors::ProblemDetails;
use crate::api::handlers::health::HealthResponse;
use crate::application::dto::{
    CreateQuoteRequest, DeleteQuoteResponse, ItemDto, QuoteDto, UploadResponse,
};

/// OpenAPI specification for the cover_vault API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "cover_vault API",
        version = "0.1.0",
        description = "Content-sniffed cover uploads with path and symlink hardening, plus item and quote resources"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::upload::upload_cover_handler,
        crate::api::handlers::items::create_item_handler,
        crate::api::handlers::items::get_item_handler,
        crate::api::handlers::quotes::list_quotes_handler,
        crate::api::handlers::quotes::get_quote_handler,
        crate::api::handlers::quotes::list_quotes_by_book_handler,
        crate::api::handlers::quotes::create_quote_handler,
        crate::api::handlers::quotes::delete_quote_handler,
    ),
    components(
        schemas(
            HealthResponse,
            UploadResponse,
            ItemDto,
            QuoteDto,
            CreateQuoteRequest,
            DeleteQuoteResponse,
            ProblemDetails,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "uploads", description = "Secure file uploads"),
        (name = "items", description = "Item operations"),
        (name = "quotes", description = "Quote operations")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
