use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde_json::Value;
use service::errors::ServiceError;
use service::items::{parse_position, Item, NewItem};
use service::pagination::Pagination;
use tracing::info;

use crate::errors::JsonApiError;
use crate::metrics::{ITEMS_CREATED_TOTAL, ITEMS_NOT_FOUND_TOTAL, ITEMS_STORED};
use crate::routes::AppState;

/// Append a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = crate::openapi::NewItemDoc,
    responses(
        (status = 200, description = "Stored item", body = crate::openapi::ItemDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ValidationErrorDoc)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Item>, JsonApiError> {
    let Json(body) = payload?;
    let input = NewItem::from_json(&body)?;
    let created = state.items.create(input).await?;

    ITEMS_CREATED_TOTAL.inc();
    ITEMS_STORED.inc();
    info!(event = "item_created", position = created.position, is_done = created.item.is_done, "item created");
    Ok(Json(created.item))
}

/// List items with `skip`/`limit` pagination
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("skip" = Option<i64>, Query, description = "Leading items to skip; negatives count as 0"),
        ("limit" = Option<i64>, Query, description = "Maximum items to return; negatives count as 0")
    ),
    responses(
        (status = 200, description = "Items in insertion order", body = [crate::openapi::ItemDoc]),
        (status = 422, description = "Validation Error", body = crate::openapi::ValidationErrorDoc)
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<Vec<Item>>, JsonApiError> {
    let Query(params) = query?;
    let page = Pagination::from_query(&params)?;
    Ok(Json(state.items.list(page).await))
}

/// Fetch the item at a zero-based position
#[utoipa::path(
    get,
    path = "/items/{item_id}",
    tag = "items",
    params(("item_id" = i64, Path, description = "Zero-based position in insertion order")),
    responses(
        (status = 200, description = "Item", body = crate::openapi::ItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::NotFoundDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ValidationErrorDoc)
    )
)]
pub async fn read_item(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Item>, JsonApiError> {
    let Path(raw_id) = path?;
    let item_id = parse_position(&raw_id)?;
    match state.items.get(item_id).await {
        Ok(item) => Ok(Json(item)),
        Err(e @ ServiceError::NotFound(_)) => {
            ITEMS_NOT_FOUND_TOTAL.inc();
            info!(event = "item_not_found", item_id, "item lookup out of range");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
