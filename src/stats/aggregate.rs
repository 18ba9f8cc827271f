use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use super::{classify, duration, parse_trip_date, StatsError, TripStatus};
use crate::models::trip::Trip;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_trips: usize,
    pub upcoming_trips: usize,
    pub distinct_destinations: usize,
    /// Overlapping trips are not merged, so shared days count once per trip.
    pub total_days_traveled: i64,
    pub total_budget: f64,
    pub average_budget: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationCount {
    pub destination: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: u32,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub running_count: usize,
}

pub fn dashboard_summary(trips: &[Trip], now: DateTime<Utc>) -> Result<DashboardSummary, StatsError> {
    let mut summary = DashboardSummary {
        total_trips: trips.len(),
        ..Default::default()
    };
    let mut destinations = HashSet::new();

    for trip in trips {
        if classify(trip, now)? == TripStatus::Upcoming {
            summary.upcoming_trips += 1;
        }
        destinations.insert(trip.destination.as_str());
        summary.total_days_traveled += duration(trip)?;
        summary.total_budget += trip.budget_amount();
    }

    summary.distinct_destinations = destinations.len();
    if summary.total_trips > 0 {
        summary.average_budget = summary.total_budget / summary.total_trips as f64;
    }
    Ok(summary)
}

/// Trip counts per destination, most visited first. Equal counts keep the
/// order in which the destinations first appear.
pub fn destination_frequency(trips: &[Trip]) -> Vec<DestinationCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<DestinationCount> = Vec::new();

    for trip in trips {
        match index.get(trip.destination.as_str()) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(trip.destination.as_str(), counts.len());
                counts.push(DestinationCount {
                    destination: trip.destination.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Trips starting in `year`, bucketed by start month. Always twelve entries.
pub fn monthly_histogram(trips: &[Trip], year: i32) -> Result<Vec<MonthCount>, StatsError> {
    let mut months = [0usize; 12];
    for trip in trips {
        let start = parse_trip_date("startDate", &trip.start_date)?;
        if start.year() == year {
            months[start.month0() as usize] += 1;
        }
    }

    Ok(months
        .iter()
        .zip(1u32..)
        .map(|(&count, month)| MonthCount { month, count })
        .collect())
}

/// One point per trip in start order, counting trips so far.
pub fn cumulative_timeline(trips: &[Trip]) -> Result<Vec<TimelinePoint>, StatsError> {
    let mut starts = trips
        .iter()
        .map(|trip| parse_trip_date("startDate", &trip.start_date))
        .collect::<Result<Vec<_>, _>>()?;
    starts.sort();

    Ok(starts
        .into_iter()
        .enumerate()
        .map(|(idx, start)| TimelinePoint {
            date: start.date(),
            running_count: idx + 1,
        })
        .collect())
}
