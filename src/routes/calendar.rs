use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::{
    error::AppError,
    services::calendar::{self, CalendarLinks},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export.ics", get(export_ics))
        .route("/links/:id", get(links))
}

async fn export_ics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let trips = state.store.snapshot().await;
    let body = calendar::ics_document(&trips)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"travel-trips.ics\"",
            ),
        ],
        body,
    ))
}

async fn links(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CalendarLinks>, AppError> {
    let trip = state.store.get(id).await?;
    Ok(Json(calendar::calendar_links(&trip)?))
}
