//! Item page handlers
//!
//! Form submissions answer `303 See Other` so a browser lands on a GET page
//! after posting.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};

use super::dto::{all_type_links, HomeResponse, ItemDto, NewItemChoices};
use crate::application::catalog::{CatalogService, ItemDraft, ItemForm};
use crate::domain::item::ItemKind;
use crate::interfaces::http::common::{ApiError, ApiResult};

/// State shared by every catalog route
#[derive(Clone)]
pub struct CatalogState {
    pub catalog: Arc<CatalogService>,
}

fn item_location(id: i32) -> String {
    format!("/items/{}", id)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Items",
    responses((status = 200, description = "Newest items and available types", body = HomeResponse))
)]
pub async fn home(State(state): State<CatalogState>) -> ApiResult<Json<HomeResponse>> {
    let recent = state.catalog.recent().await?;
    Ok(Json(HomeResponse {
        recent: recent.into_iter().map(ItemDto::from).collect(),
        types: all_type_links(),
    }))
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "Items",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item details", body = ItemDto),
        (status = 404, description = "Not found")
    )
)]
pub async fn item_detail(
    State(state): State<CatalogState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ItemDto>> {
    let item = state.catalog.get(id).await?;
    Ok(Json(item.into()))
}

#[utoipa::path(
    get,
    path = "/items/new",
    tag = "Items",
    responses((status = 200, description = "Creatable types", body = NewItemChoices))
)]
pub async fn new_item_choices() -> Json<NewItemChoices> {
    Json(NewItemChoices {
        types: all_type_links(),
    })
}

#[utoipa::path(
    post,
    path = "/items/new/{item_type}",
    tag = "Items",
    params(("item_type" = String, Path, description = "book, cd, dvd, board_game or boardgame")),
    responses(
        (status = 303, description = "Created; redirects to the item"),
        (status = 400, description = "Unknown type or unparsable field")
    )
)]
pub async fn create_item(
    State(state): State<CatalogState>,
    Path(item_type): Path<String>,
    Form(form): Form<ItemForm>,
) -> ApiResult<Redirect> {
    let kind =
        ItemKind::from_alias(&item_type).ok_or_else(|| ApiError::bad_request("Unknown type"))?;
    let draft = ItemDraft::try_from(form)?;
    let item = state.catalog.create(kind, draft).await?;
    Ok(Redirect::to(&item_location(item.id)))
}

#[utoipa::path(
    post,
    path = "/items/{id}/edit",
    tag = "Items",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 303, description = "Updated; redirects to the item"),
        (status = 400, description = "Unparsable field"),
        (status = 404, description = "Not found")
    )
)]
pub async fn edit_item(
    State(state): State<CatalogState>,
    Path(id): Path<i32>,
    Form(form): Form<ItemForm>,
) -> ApiResult<Redirect> {
    let draft = ItemDraft::try_from(form)?;
    let item = state.catalog.update(id, draft).await?;
    Ok(Redirect::to(&item_location(item.id)))
}

#[utoipa::path(
    post,
    path = "/items/{id}/delete",
    tag = "Items",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 303, description = "Deleted; redirects home"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_item(
    State(state): State<CatalogState>,
    Path(id): Path<i32>,
) -> ApiResult<Redirect> {
    state.catalog.delete(id).await?;
    Ok(Redirect::to("/"))
}
