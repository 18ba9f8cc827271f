pub mod calendar;
pub mod public;
pub mod statistics;
pub mod trips;

use axum::Router;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .merge(public::router())
        .nest("/api/trips", trips::router())
        .nest("/api/statistics", statistics::router())
        .nest("/api/calendar", calendar::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `?now=` override for status-dependent endpoints; the wall clock otherwise.
#[derive(Debug, Default, Deserialize)]
pub struct NowQuery {
    pub now: Option<DateTime<Utc>>,
}

impl NowQuery {
    pub fn resolve(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}
