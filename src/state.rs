use crate::{config::AppConfig, services::store::TripStore};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: TripStore,
}

impl AppState {
    pub fn new(config: AppConfig, store: TripStore) -> Self {
        Self { config, store }
    }
}
