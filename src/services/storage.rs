use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::fs;
use tracing::debug;

use crate::{error::AppError, models::trip::Trip};

const TRIPS_FILE: &str = "trips.json";

/// JSON snapshot of the trip collection on local disk.
#[derive(Clone)]
pub struct StorageService {
    root: Arc<PathBuf>,
}

impl StorageService {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn trips_path(&self) -> PathBuf {
        self.root().join(TRIPS_FILE)
    }

    pub async fn ensure_structure(&self) -> Result<(), AppError> {
        fs::create_dir_all(self.root()).await?;
        Ok(())
    }

    /// `None` when no snapshot has been written yet; a stored `[]` is `Some`.
    pub async fn load_trips(&self) -> Result<Option<Vec<Trip>>, AppError> {
        let path = self.trips_path();
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }
        let raw = fs::read(&path).await?;
        if raw.is_empty() {
            return Ok(None);
        }
        let trips: Vec<Trip> =
            serde_json::from_slice(&raw).map_err(|err| AppError::Other(err.into()))?;
        debug!("loaded {} trips from {}", trips.len(), path.display());
        Ok(Some(trips))
    }

    pub async fn save_trips(&self, trips: &[Trip]) -> Result<(), AppError> {
        self.ensure_structure().await?;
        let data = serde_json::to_vec_pretty(trips).map_err(|err| AppError::Other(err.into()))?;
        fs::write(self.trips_path(), data).await?;
        Ok(())
    }
}
