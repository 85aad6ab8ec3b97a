use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::api::errors::ApiError;
use crate::application::dto::ItemDto;
use crate::application::use_cases::{CreateItemUseCase, GetItemUseCase};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CreateItemQuery {
    /// Item name, 1 to 100 characters
    name: String,
}

/// POST /items?name=
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    params(CreateItemQuery),
    responses(
        (status = 200, description = "Item created", body = ItemDto),
        (status = 422, description = "Invalid name", body = crate::api::errors::ProblemDetails)
    )
)]
pub async fn create_item_handler(
    State(use_case): State<Arc<CreateItemUseCase>>,
    query: Result<Query<CreateItemQuery>, QueryRejection>,
) -> Result<Json<ItemDto>, ApiError> {
    let Query(query) = query?;
    let item = use_case.execute(query.name).await?;
    Ok(Json(item))
}

/// GET /items/{id}
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(("id" = u64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item found", body = ItemDto),
        (status = 404, description = "Item not found", body = crate::api::errors::ProblemDetails)
    )
)]
pub async fn get_item_handler(
    State(use_case): State<Arc<GetItemUseCase>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<ItemDto>, ApiError> {
    let Path(id) = id?;
    let item = use_case.execute(id).await?;
    Ok(Json(item))
}
