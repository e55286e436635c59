//! Calendar widget feed

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use agenda_core::CalendarEntry;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/events", get(calendar_feed))
}

/// Feed consumed by the calendar widget
#[derive(Serialize)]
pub struct CalendarFeed {
    pub events: Vec<CalendarEntry>,
}

/// GET /api/events - All events, pending and completed alike, formatted
/// for calendar rendering
async fn calendar_feed(State(state): State<AppState>) -> Result<Json<CalendarFeed>, AppError> {
    let events = state
        .store()
        .list_all()
        .await?
        .iter()
        .map(|event| event.record.calendar_entry())
        .collect();

    Ok(Json(CalendarFeed { events }))
}
