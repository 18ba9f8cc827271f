use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use super::{color_for, parse_trip_date, StatsError};
use crate::models::trip::Trip;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Past,
    Current,
    Upcoming,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Past => "past",
            TripStatus::Current => "current",
            TripStatus::Upcoming => "upcoming",
        }
    }

    /// Calendar colour for the status.
    pub fn color(&self) -> &'static str {
        match self {
            TripStatus::Past => "#95a5a6",
            TripStatus::Current => "#2ecc71",
            TripStatus::Upcoming => "#3498db",
        }
    }
}

fn bounds(trip: &Trip) -> Result<(NaiveDateTime, NaiveDateTime), StatsError> {
    let start = parse_trip_date("startDate", &trip.start_date)?;
    let end = parse_trip_date("endDate", &trip.end_date)?;
    Ok((start, end))
}

/// Inclusive day count. Reversed ranges are measured the same as forward ones.
pub fn duration(trip: &Trip) -> Result<i64, StatsError> {
    let (start, end) = bounds(trip)?;
    let diff_ms = (end - start).num_milliseconds().abs();
    Ok((diff_ms + DAY_MS - 1) / DAY_MS + 1)
}

pub fn classify(trip: &Trip, now: DateTime<Utc>) -> Result<TripStatus, StatsError> {
    let (start, end) = bounds(trip)?;
    let now = now.naive_utc();
    let status = if start <= now && now <= end {
        TripStatus::Current
    } else if start > now {
        TripStatus::Upcoming
    } else {
        TripStatus::Past
    };
    Ok(status)
}

/// Per-trip derived values for cards and calendar entries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripOverview {
    pub id: u64,
    pub name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub duration_days: i64,
    pub status: TripStatus,
    pub status_color: &'static str,
    pub destination_color: &'static str,
    pub budget: f64,
}

pub fn trip_overview(trip: &Trip, now: DateTime<Utc>) -> Result<TripOverview, StatsError> {
    let status = classify(trip, now)?;
    Ok(TripOverview {
        id: trip.id,
        name: trip.name.clone(),
        destination: trip.destination.clone(),
        start_date: trip.start_date.clone(),
        end_date: trip.end_date.clone(),
        duration_days: duration(trip)?,
        status,
        status_color: status.color(),
        destination_color: color_for(&trip.destination),
        budget: trip.budget_amount(),
    })
}
