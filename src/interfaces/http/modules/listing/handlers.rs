//! Listing handler

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{ListingQuery, ListingResponse};
use crate::interfaces::http::common::ApiResult;
use crate::interfaces::http::modules::items::CatalogState;

#[utoipa::path(
    get,
    path = "/items/type/{item_type}",
    tag = "Listing",
    params(
        ("item_type" = String, Path, description = "book, cd, dvd, board_game or boardgame; unknown types list nothing"),
        ListingQuery
    ),
    responses(
        (status = 200, description = "One page of the listing", body = ListingResponse),
        (status = 400, description = "Invalid cursor")
    )
)]
pub async fn list_by_type(
    State(state): State<CatalogState>,
    Path(item_type): Path<String>,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Json<ListingResponse>> {
    let listing = state
        .catalog
        .list_by_type(&item_type, query.to_request())
        .await?;
    Ok(Json(listing.into()))
}
