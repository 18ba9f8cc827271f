use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{
    error::AppError,
    models::trip::{NewTrip, Trip, TripPatch},
    services::storage::StorageService,
};

/// Owner of the mutable trip collection.
///
/// Readers get cloned snapshots, so statistics never observe a half-applied
/// update. When a [`StorageService`] is attached every mutation is written
/// through to disk before the lock is released, and only committed to memory
/// once that write succeeded.
#[derive(Clone)]
pub struct TripStore {
    inner: Arc<RwLock<Inner>>,
    storage: Option<StorageService>,
}

struct Inner {
    trips: Vec<Trip>,
    next_id: u64,
}

impl Inner {
    fn new(trips: Vec<Trip>) -> Self {
        let next_id = trips.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self { trips, next_id }
    }

    fn position(&self, id: u64) -> Result<usize, AppError> {
        self.trips
            .iter()
            .position(|t| t.id == id)
            .ok_or(AppError::NotFound)
    }
}

impl TripStore {
    pub fn in_memory(trips: Vec<Trip>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::new(trips))),
            storage: None,
        }
    }

    /// Loads the snapshot, seeding it with `seed` when no snapshot was written yet.
    /// A stored empty list stays empty.
    pub async fn persistent(storage: StorageService, seed: Vec<Trip>) -> Result<Self, AppError> {
        storage.ensure_structure().await?;
        let trips = match storage.load_trips().await? {
            Some(trips) => trips,
            None => {
                storage.save_trips(&seed).await?;
                seed
            }
        };
        info!(
            "trip snapshot at {} holds {} trips",
            storage.trips_path().display(),
            trips.len()
        );
        Ok(Self {
            inner: Arc::new(RwLock::new(Inner::new(trips))),
            storage: Some(storage),
        })
    }

    pub async fn list(&self) -> Vec<Trip> {
        self.inner.read().await.trips.clone()
    }

    /// Alias of [`TripStore::list`] for statistics callers.
    pub async fn snapshot(&self) -> Vec<Trip> {
        self.list().await
    }

    pub async fn get(&self, id: u64) -> Result<Trip, AppError> {
        let inner = self.inner.read().await;
        let idx = inner.position(id)?;
        Ok(inner.trips[idx].clone())
    }

    pub async fn create(&self, new_trip: NewTrip, now: DateTime<Utc>) -> Result<Trip, AppError> {
        let mut inner = self.inner.write().await;
        let trip = new_trip.into_trip(inner.next_id, now)?;
        let mut trips = inner.trips.clone();
        trips.push(trip.clone());
        self.persist(&trips).await?;
        inner.trips = trips;
        inner.next_id += 1;
        debug!("created trip {} ({})", trip.id, trip.destination);
        Ok(trip)
    }

    pub async fn update(
        &self,
        id: u64,
        patch: TripPatch,
        now: DateTime<Utc>,
    ) -> Result<Trip, AppError> {
        let mut inner = self.inner.write().await;
        let idx = inner.position(id)?;
        let mut trip = inner.trips[idx].clone();
        patch.apply(&mut trip, now)?;
        let mut trips = inner.trips.clone();
        trips[idx] = trip.clone();
        self.persist(&trips).await?;
        inner.trips = trips;
        debug!("updated trip {id}");
        Ok(trip)
    }

    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let idx = inner.position(id)?;
        let mut trips = inner.trips.clone();
        trips.remove(idx);
        self.persist(&trips).await?;
        inner.trips = trips;
        debug!("deleted trip {id}");
        Ok(())
    }

    async fn persist(&self, trips: &[Trip]) -> Result<(), AppError> {
        match &self.storage {
            Some(storage) => storage.save_trips(trips).await,
            None => Ok(()),
        }
    }
}

/// The two sample trips a fresh installation starts with.
pub fn demo_trips(now: DateTime<Utc>) -> Vec<Trip> {
    vec![
        Trip {
            id: 1,
            name: "Weekend in Paris".into(),
            destination: "Paris, France".into(),
            start_date: "2024-02-15".into(),
            end_date: "2024-02-18".into(),
            description: "Romantic weekend getaway to the City of Light".into(),
            budget: 1500.0,
            created_at: now,
            updated_at: None,
        },
        Trip {
            id: 2,
            name: "Business Trip to Tokyo".into(),
            destination: "Tokyo, Japan".into(),
            start_date: "2024-03-10".into(),
            end_date: "2024-03-15".into(),
            description: "Client meetings and project discussions".into(),
            budget: 3000.0,
            created_at: now,
            updated_at: None,
        },
    ]
}
