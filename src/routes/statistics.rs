use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::NowQuery;
use crate::{
    error::AppError,
    state::AppState,
    stats::{self, DashboardSummary, DestinationCount, MonthCount, TimelinePoint, TripStatus},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/destinations", get(destinations))
        .route("/monthly/:year", get(monthly))
        .route("/timeline", get(timeline))
        .route("/calendar", get(calendar_events))
}

async fn dashboard(
    State(state): State<AppState>,
    Query(at): Query<NowQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let trips = state.store.snapshot().await;
    Ok(Json(stats::dashboard_summary(&trips, at.resolve())?))
}

#[derive(Debug, Deserialize)]
struct DestinationsQuery {
    limit: Option<usize>,
}

async fn destinations(
    State(state): State<AppState>,
    Query(query): Query<DestinationsQuery>,
) -> Json<Vec<DestinationCount>> {
    let trips = state.store.snapshot().await;
    let mut counts = stats::destination_frequency(&trips);
    if let Some(limit) = query.limit {
        counts.truncate(limit);
    }
    Json(counts)
}

async fn monthly(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<Vec<MonthCount>>, AppError> {
    let trips = state.store.snapshot().await;
    Ok(Json(stats::monthly_histogram(&trips, year)?))
}

async fn timeline(State(state): State<AppState>) -> Result<Json<Vec<TimelinePoint>>, AppError> {
    let trips = state.store.snapshot().await;
    Ok(Json(stats::cumulative_timeline(&trips)?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalendarEvent {
    id: u64,
    title: String,
    start: String,
    end: String,
    color: &'static str,
    status: TripStatus,
    status_color: &'static str,
    destination: String,
    duration_days: i64,
    budget: f64,
}

async fn calendar_events(
    State(state): State<AppState>,
    Query(at): Query<NowQuery>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let now = at.resolve();
    let trips = state.store.snapshot().await;
    let events = trips
        .iter()
        .map(|trip| {
            stats::trip_overview(trip, now).map(|view| CalendarEvent {
                id: view.id,
                title: view.name,
                start: view.start_date,
                end: view.end_date,
                color: view.destination_color,
                status: view.status,
                status_color: view.status_color,
                destination: view.destination,
                duration_days: view.duration_days,
                budget: view.budget,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(events))
}
