//! JSON API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateItemRequest, CreatedItemResponse};
use crate::application::catalog::CatalogService;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::modules::items::{CatalogState, ItemDto};

#[utoipa::path(
    get,
    path = "/api/items",
    tag = "API",
    responses((status = 200, description = "Every item", body = Vec<ItemDto>))
)]
pub async fn list_items(State(state): State<CatalogState>) -> ApiResult<Json<Vec<ItemDto>>> {
    let items = state.catalog.list_all().await?;
    Ok(Json(items.into_iter().map(ItemDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/items",
    tag = "API",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Created", body = CreatedItemResponse),
        (status = 400, description = "Unknown type or malformed JSON", body = ApiResponse<String>),
        (status = 422, description = "Validation failed", body = ApiResponse<String>)
    )
)]
pub async fn create_item(
    State(state): State<CatalogState>,
    ValidatedJson(req): ValidatedJson<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<CreatedItemResponse>)> {
    let kind = CatalogService::creatable_kind(req.item_type.as_deref())?;
    let item = state.catalog.create(kind, req.into()).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    tag = "API",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item", body = ItemDto),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn get_item(
    State(state): State<CatalogState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ItemDto>> {
    let item = state.catalog.get(id).await?;
    Ok(Json(item.into()))
}

#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    tag = "API",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn delete_item(
    State(state): State<CatalogState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
