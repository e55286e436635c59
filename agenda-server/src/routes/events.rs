//! Event endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};

use agenda_core::StoredEvent;

use crate::routes::{AppError, ErrorResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events/pending", get(list_pending))
        .route("/events/completed", get(list_completed))
        .route("/events", post(create_event))
        .route("/events/{id}/toggle", post(toggle_event))
        .route("/events/{id}", delete(delete_event))
}

/// GET /events/pending - Events not yet carried out
async fn list_pending(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredEvent>>, AppError> {
    Ok(Json(state.store().list_pending().await?))
}

/// GET /events/completed - Events already carried out
async fn list_completed(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredEvent>>, AppError> {
    Ok(Json(state.store().list_completed().await?))
}

/// Request body for creating an event
#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    /// Event day as `YYYY-MM-DD` text
    pub date: String,
    pub category: String,
}

/// POST /events - Create a new pending event
async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Response, AppError> {
    let added = state
        .store()
        .add(&req.title, &req.date, &req.category)
        .await?;

    if added {
        Ok(StatusCode::CREATED.into_response())
    } else {
        let body = Json(ErrorResponse {
            error: format!("Invalid date '{}': expected YYYY-MM-DD", req.date),
        });
        Ok((StatusCode::UNPROCESSABLE_ENTITY, body).into_response())
    }
}

/// Outcome of a toggle, so callers can tell a flip from an
/// already-absent event
#[derive(Serialize)]
pub struct ToggleResponse {
    pub toggled: bool,
}

/// POST /events/:id/toggle - Flip an event's completion flag
///
/// Unknown identifiers are a successful no-op.
async fn toggle_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, AppError> {
    let toggled = state.store().toggle(&id).await?;
    Ok(Json(ToggleResponse { toggled }))
}

/// Outcome of a delete
#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// DELETE /events/:id - Remove an event
///
/// Unknown identifiers are a successful no-op.
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.store().delete(&id).await?;
    Ok(Json(DeleteResponse { deleted }))
}
