//! List endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::db::repos::{List, ListRepo, ListUpdate};
use crate::http::error::ApiError;
use crate::http::payload::OneOrMany;
use crate::http::server::AppState;

/// Create list request
#[derive(Deserialize)]
pub struct CreateListRequest {
    pub title: Option<String>,
}

/// Bulk update request: one item or an array of items under `lists`
#[derive(Deserialize)]
pub struct UpdateListsRequest {
    pub lists: OneOrMany<ListUpdate>,
}

/// List response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub id: i64,
    pub title: String,
    pub position: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<List> for ListResponse {
    fn from(l: List) -> Self {
        Self {
            id: l.id,
            title: l.title,
            position: l.position,
            created_at: l.created_at.to_rfc3339(),
            updated_at: l.updated_at.to_rfc3339(),
        }
    }
}

/// GET /lists - all lists in board order
async fn list_lists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ListResponse>>, ApiError> {
    let lists = ListRepo::new(&state.pool).list().await?;
    Ok(Json(lists.into_iter().map(ListResponse::from).collect()))
}

/// POST /lists - create a list at the end of the board
async fn create_list(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    let list = ListRepo::new(&state.pool).create(req.title).await?;
    Ok((StatusCode::CREATED, Json(ListResponse::from(list))))
}

/// PUT /lists - bulk update, all-or-nothing
///
/// Responds with the updated rows in input order, always as an array.
async fn update_lists(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateListsRequest>,
) -> Result<Json<Vec<ListResponse>>, ApiError> {
    let items = req.lists.into_vec();
    let updated = ListRepo::new(&state.pool).bulk_update(&items).await?;
    Ok(Json(updated.into_iter().map(ListResponse::from).collect()))
}

/// DELETE /lists/{id} - delete a list and, via cascade, its cards
async fn delete_list(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let deleted = ListRepo::new(&state.pool).delete(id).await?;
    if deleted {
        Ok(Json(json!({ "message": "List deleted" })))
    } else {
        Err(ApiError::NotFound {
            resource: "list",
            id: id.to_string(),
        })
    }
}

/// List routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lists", get(list_lists).post(create_list).put(update_lists))
        .route("/lists/{id}", delete(delete_list))
}
