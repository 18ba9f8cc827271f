use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tracing::info;

use crate::{
    error::AppError,
    models::trip::{NewTrip, Trip, TripPatch},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/:id", get(get_trip).put(update_trip).delete(delete_trip))
}

async fn list_trips(State(state): State<AppState>) -> Json<Vec<Trip>> {
    Json(state.store.list().await)
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Trip>, AppError> {
    Ok(Json(state.store.get(id).await?))
}

async fn create_trip(
    State(state): State<AppState>,
    Json(payload): Json<NewTrip>,
) -> Result<(StatusCode, Json<Trip>), AppError> {
    let trip = state.store.create(payload, Utc::now()).await?;
    info!("trip {} to {} created", trip.id, trip.destination);
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<TripPatch>,
) -> Result<Json<Trip>, AppError> {
    let trip = state.store.update(id, patch, Utc::now()).await?;
    info!("trip {id} updated");
    Ok(Json(trip))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.store.delete(id).await?;
    info!("trip {id} deleted");
    Ok(StatusCode::NO_CONTENT)
}
