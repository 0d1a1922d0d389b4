//! Card endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::db::repos::{Card, CardRepo, CardUpdate};
use crate::http::error::ApiError;
use crate::http::payload::OneOrMany;
use crate::http::server::AppState;

/// Create card request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub title: Option<String>,
    pub list_id: Option<i64>,
}

/// Bulk update request: one item or an array of items under `cards`
#[derive(Deserialize)]
pub struct UpdateCardsRequest {
    pub cards: OneOrMany<CardUpdate>,
}

/// Card response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub position: i64,
    pub completed: bool,
    pub due_date: Option<String>,
    pub list_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Card> for CardResponse {
    fn from(c: Card) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            position: c.position,
            completed: c.completed,
            due_date: c.due_date.map(|d| d.to_rfc3339()),
            list_id: c.list_id,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// GET /cards - all cards across every list
async fn list_cards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CardResponse>>, ApiError> {
    let cards = CardRepo::new(&state.pool).list().await?;
    Ok(Json(cards.into_iter().map(CardResponse::from).collect()))
}

/// GET /lists/{id}/cards - cards belonging to one list
async fn list_cards_for_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
) -> Result<Json<Vec<CardResponse>>, ApiError> {
    let cards = CardRepo::new(&state.pool).list_for_list(list_id).await?;
    Ok(Json(cards.into_iter().map(CardResponse::from).collect()))
}

/// POST /cards - create a card at the end of its list
async fn create_card(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<CardResponse>), ApiError> {
    let card = CardRepo::new(&state.pool).create(req.title, req.list_id).await?;
    Ok((StatusCode::CREATED, Json(CardResponse::from(card))))
}

/// PUT /cards - bulk update, all-or-nothing
///
/// Responds with the updated rows in input order, always as an array.
async fn update_cards(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateCardsRequest>,
) -> Result<Json<Vec<CardResponse>>, ApiError> {
    let items = req.cards.into_vec();
    let updated = CardRepo::new(&state.pool).bulk_update(&items).await?;
    Ok(Json(updated.into_iter().map(CardResponse::from).collect()))
}

/// DELETE /cards/{id} - delete a single card
async fn delete_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let deleted = CardRepo::new(&state.pool).delete(id).await?;
    if deleted {
        Ok(Json(json!({ "message": "Card deleted" })))
    } else {
        Err(ApiError::NotFound {
            resource: "card",
            id: id.to_string(),
        })
    }
}

/// Card routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cards", get(list_cards).post(create_card).put(update_cards))
        .route("/cards/{id}", delete(delete_card))
        .route("/lists/{id}/cards", get(list_cards_for_list))
}
