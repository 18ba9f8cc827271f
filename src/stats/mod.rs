//! Derived statistics over a trip collection.
//!
//! Every function here is a pure function of its arguments: the collection is
//! borrowed, never mutated, and the reference time is always passed in.

mod aggregate;
mod classify;
mod palette;

pub use aggregate::{
    cumulative_timeline, dashboard_summary, destination_frequency, monthly_histogram,
    DashboardSummary, DestinationCount, MonthCount, TimelinePoint,
};
pub use classify::{classify, duration, trip_overview, TripOverview, TripStatus};
pub use palette::{bucket_for, color_for, PALETTE};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("invalid {field}: {value:?} is not a date")]
    InvalidDate { field: &'static str, value: String },
}

/// Parses a trip date as a UTC timestamp.
///
/// Plain `YYYY-MM-DD` values mean midnight UTC. Full RFC 3339 timestamps are
/// converted to UTC, and offset-less `YYYY-MM-DDTHH:MM[:SS]` values are taken
/// as UTC as well.
pub fn parse_trip_date(field: &'static str, raw: &str) -> Result<NaiveDateTime, StatsError> {
    let value = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| StatsError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_supported_formats() {
        let midnight = NaiveDate::from_ymd_opt(2024, 2, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_trip_date("startDate", "2024-02-15").unwrap(), midnight);
        assert_eq!(
            parse_trip_date("startDate", "2024-02-15T02:00:00+02:00").unwrap(),
            midnight
        );
        assert_eq!(
            parse_trip_date("startDate", "2024-02-15T00:00").unwrap(),
            midnight
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_trip_date("endDate", "soon").unwrap_err();
        assert_eq!(
            err,
            StatsError::InvalidDate {
                field: "endDate",
                value: "soon".into()
            }
        );
        assert!(parse_trip_date("endDate", "2024-02-30").is_err());
    }
}
