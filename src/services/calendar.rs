//! Calendar exports: an iCalendar document and per-trip "add to calendar" links.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::{error::AppError, models::trip::Trip, stats};

const GOOGLE_RENDER_URL: &str = "https://calendar.google.com/calendar/render";
const OUTLOOK_COMPOSE_URL: &str = "https://outlook.live.com/calendar/0/deeplink/compose";
const UID_DOMAIN: &str = "travelorganizer.com";

#[derive(Debug, Clone, Serialize)]
pub struct CalendarLinks {
    pub google: String,
    pub outlook: String,
}

fn compact_utc(ts: NaiveDateTime) -> String {
    ts.format("%Y%m%dT%H%M%SZ").to_string()
}

fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Renders every trip as a VEVENT. Lines are CRLF separated.
pub fn ics_document(trips: &[Trip]) -> Result<String, AppError> {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Travel Organizer//Travel Trips//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    for trip in trips {
        let start = stats::parse_trip_date("startDate", &trip.start_date)?;
        let end = stats::parse_trip_date("endDate", &trip.end_date)?;
        lines.push("BEGIN:VEVENT".into());
        lines.push(format!("UID:trip-{}@{UID_DOMAIN}", trip.id));
        lines.push(format!("DTSTART:{}", compact_utc(start)));
        lines.push(format!("DTEND:{}", compact_utc(end)));
        lines.push(format!("DTSTAMP:{}", compact_utc(trip.created_at.naive_utc())));
        lines.push(format!("SUMMARY:{}", escape_text(&trip.name)));
        lines.push(format!(
            "DESCRIPTION:{}",
            escape_text(&trip.description_or_default())
        ));
        lines.push(format!("LOCATION:{}", escape_text(&trip.destination)));
        if trip.budget_amount() > 0.0 {
            lines.push(format!("COMMENT:Budget: ${}", trip.budget_amount()));
        }
        lines.push("END:VEVENT".into());
    }

    lines.push("END:VCALENDAR".into());
    Ok(lines.join("\r\n"))
}

fn link_details(trip: &Trip) -> String {
    let budget = if trip.budget_amount() > 0.0 {
        trip.budget_amount().to_string()
    } else {
        "Not set".to_string()
    };
    format!(
        "{}\n\nDestination: {}\nBudget: ${budget}",
        trip.description_or_default(),
        trip.destination
    )
}

pub fn google_calendar_link(trip: &Trip) -> Result<Url, AppError> {
    let start = stats::parse_trip_date("startDate", &trip.start_date)?;
    let end = stats::parse_trip_date("endDate", &trip.end_date)?;
    let dates = format!("{}/{}", compact_utc(start), compact_utc(end));
    Url::parse_with_params(
        GOOGLE_RENDER_URL,
        &[
            ("action", "TEMPLATE"),
            ("text", trip.name.as_str()),
            ("dates", dates.as_str()),
            ("details", link_details(trip).as_str()),
            ("location", trip.destination.as_str()),
        ],
    )
    .map_err(|err| AppError::Other(err.into()))
}

pub fn outlook_link(trip: &Trip) -> Result<Url, AppError> {
    let iso = |ts: NaiveDateTime| {
        DateTime::<Utc>::from_naive_utc_and_offset(ts, Utc)
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    };
    let start = iso(stats::parse_trip_date("startDate", &trip.start_date)?);
    let end = iso(stats::parse_trip_date("endDate", &trip.end_date)?);
    Url::parse_with_params(
        OUTLOOK_COMPOSE_URL,
        &[
            ("subject", trip.name.as_str()),
            ("startdt", start.as_str()),
            ("enddt", end.as_str()),
            ("body", link_details(trip).as_str()),
            ("location", trip.destination.as_str()),
        ],
    )
    .map_err(|err| AppError::Other(err.into()))
}

pub fn calendar_links(trip: &Trip) -> Result<CalendarLinks, AppError> {
    Ok(CalendarLinks {
        google: google_calendar_link(trip)?.into(),
        outlook: outlook_link(trip)?.into(),
    })
}
