use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};

use super::NowQuery;
use crate::{
    error::AppError,
    state::AppState,
    stats::{self, TripOverview},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "timestamp": Utc::now().to_rfc3339() }))
}

struct TripCard {
    name: String,
    destination: String,
    dates: String,
    duration_days: i64,
    status: &'static str,
    status_color: &'static str,
    destination_color: &'static str,
    budget: Option<String>,
}

impl From<TripOverview> for TripCard {
    fn from(view: TripOverview) -> Self {
        Self {
            dates: format!("{} – {}", view.start_date, view.end_date),
            name: view.name,
            destination: view.destination,
            duration_days: view.duration_days,
            status: view.status.as_str(),
            status_color: view.status_color,
            destination_color: view.destination_color,
            budget: (view.budget > 0.0).then(|| format_money(view.budget)),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    total_trips: usize,
    upcoming_trips: usize,
    distinct_destinations: usize,
    total_days_traveled: i64,
    total_budget: String,
    average_budget: String,
    cards: Vec<TripCard>,
}

async fn dashboard(
    State(state): State<AppState>,
    Query(at): Query<NowQuery>,
) -> Result<impl IntoResponse, AppError> {
    let now = at.resolve();
    let trips = state.store.snapshot().await;
    let summary = stats::dashboard_summary(&trips, now)?;

    let mut dated = trips
        .iter()
        .map(|trip| {
            let start = stats::parse_trip_date("startDate", &trip.start_date)?;
            Ok((start, stats::trip_overview(trip, now)?))
        })
        .collect::<Result<Vec<_>, stats::StatsError>>()?;
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    Ok(AskamaTemplateResponse::into_response(DashboardTemplate {
        total_trips: summary.total_trips,
        upcoming_trips: summary.upcoming_trips,
        distinct_destinations: summary.distinct_destinations,
        total_days_traveled: summary.total_days_traveled,
        total_budget: format_money(summary.total_budget),
        average_budget: format_money(summary.average_budget),
        cards: dated.into_iter().map(|(_, view)| view.into()).collect(),
    }))
}

fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}
