use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::{ApiError, ProblemDetails};
use crate::application::dto::{CreateQuoteRequest, DeleteQuoteResponse, QuoteDto};
use crate::application::use_cases::{
    CreateQuoteUseCase, DeleteQuoteUseCase, GetQuoteUseCase, ListQuotesByBookUseCase,
    ListQuotesUseCase,
};

/// GET /quotes
#[utoipa::path(
    get,
    path = "/quotes",
    tag = "quotes",
    responses(
        (status = 200, description = "All quotes in insertion order", body = [QuoteDto])
    )
)]
pub async fn list_quotes_handler(
    State(use_case): State<Arc<ListQuotesUseCase>>,
) -> Result<Json<Vec<QuoteDto>>, ApiError> {
    Ok(Json(use_case.execute().await?))
}

/// GET /quotes/{id}
#[utoipa::path(
    get,
    path = "/quotes/{id}",
    tag = "quotes",
    params(("id" = u64, Path, description = "Quote id")),
    responses(
        (status = 200, description = "Quote found", body = QuoteDto),
        (status = 404, description = "Quote not found", body = ProblemDetails)
    )
)]
pub async fn get_quote_handler(
    State(use_case): State<Arc<GetQuoteUseCase>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<QuoteDto>, ApiError> {
    let Path(id) = id?;
    Ok(Json(use_case.execute(id).await?))
}

/// GET /quotes/book/{book}
#[utoipa::path(
    get,
    path = "/quotes/book/{book}",
    tag = "quotes",
    params(("book" = String, Path, description = "Exact book title")),
    responses(
        (status = 200, description = "Quotes from the book", body = [QuoteDto]),
        (status = 404, description = "No quotes for the book", body = ProblemDetails)
    )
)]
pub async fn list_quotes_by_book_handler(
    State(use_case): State<Arc<ListQuotesByBookUseCase>>,
    book: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<QuoteDto>>, ApiError> {
    let Path(book) = book?;
    Ok(Json(use_case.execute(&book).await?))
}

/// POST /quotes
#[utoipa::path(
    post,
    path = "/quotes",
    tag = "quotes",
    request_body = CreateQuoteRequest,
    responses(
        (status = 200, description = "Quote created", body = QuoteDto),
        (status = 422, description = "Invalid quote", body = ProblemDetails)
    )
)]
pub async fn create_quote_handler(
    State(use_case): State<Arc<CreateQuoteUseCase>>,
    request: Result<Json<CreateQuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteDto>, ApiError> {
    let Json(request) = request?;
    Ok(Json(use_case.execute(request).await?))
}

/// DELETE /quotes/{id}
#[utoipa::path(
    delete,
    path = "/quotes/{id}",
    tag = "quotes",
    params(("id" = u64, Path, description = "Quote id")),
    responses(
        (status = 200, description = "Quote deleted", body = DeleteQuoteResponse),
        (status = 404, description = "Quote not found", body = ProblemDetails)
    )
)]
pub async fn delete_quote_handler(
    State(use_case): State<Arc<DeleteQuoteUseCase>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<DeleteQuoteResponse>, ApiError> {
    let Path(id) = id?;
    Ok(Json(use_case.execute(id).await?))
}
