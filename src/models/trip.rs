use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, DefaultOnNull, DisplayFromStr, PickFirst};

use crate::{error::AppError, stats};

/// A single travel entry. Dates stay as the caller sent them and are parsed
/// by [`crate::stats`] on demand.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: u64,
    pub name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub description: String,
    #[serde_as(as = "DefaultOnError<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub budget: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// Budget as used by aggregations: anything that is not a finite number counts as zero.
    pub fn budget_amount(&self) -> f64 {
        if self.budget.is_finite() {
            self.budget
        } else {
            0.0
        }
    }

    pub fn description_or_default(&self) -> String {
        if self.description.trim().is_empty() {
            format!("Travel trip to {}", self.destination)
        } else {
            self.description.clone()
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde_as(as = "DefaultOnError<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub budget: f64,
}

impl NewTrip {
    pub fn into_trip(self, id: u64, now: DateTime<Utc>) -> Result<Trip, AppError> {
        let (Some(name), Some(destination), Some(start_date), Some(end_date)) = (
            normalize_optional(self.name),
            normalize_optional(self.destination),
            normalize_optional(self.start_date),
            normalize_optional(self.end_date),
        ) else {
            return Err(AppError::BadRequest("Missing required fields".into()));
        };

        check_date("startDate", &start_date)?;
        check_date("endDate", &end_date)?;

        Ok(Trip {
            id,
            name,
            destination,
            start_date,
            end_date,
            description: self.description.map(|d| d.trim().to_string()).unwrap_or_default(),
            budget: self.budget,
            created_at: now,
            updated_at: None,
        })
    }
}

/// Merge-style update: absent or blank fields keep the stored value.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub budget: Option<f64>,
}

impl TripPatch {
    pub fn apply(self, trip: &mut Trip, now: DateTime<Utc>) -> Result<(), AppError> {
        let start_date = normalize_optional(self.start_date);
        let end_date = normalize_optional(self.end_date);
        if let Some(raw) = &start_date {
            check_date("startDate", raw)?;
        }
        if let Some(raw) = &end_date {
            check_date("endDate", raw)?;
        }

        if let Some(name) = normalize_optional(self.name) {
            trip.name = name;
        }
        if let Some(destination) = normalize_optional(self.destination) {
            trip.destination = destination;
        }
        if let Some(start_date) = start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = end_date {
            trip.end_date = end_date;
        }
        if let Some(description) = self.description {
            trip.description = description.trim().to_string();
        }
        if let Some(budget) = self.budget.filter(|b| b.is_finite()) {
            trip.budget = budget;
        }
        trip.updated_at = Some(now);
        Ok(())
    }
}

fn check_date(field: &'static str, raw: &str) -> Result<(), AppError> {
    stats::parse_trip_date(field, raw)
        .map(|_| ())
        .map_err(|err| AppError::BadRequest(err.to_string()))
}

fn normalize_optional(input: Option<String>) -> Option<String> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
