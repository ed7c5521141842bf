//! ICS feed parsing using the icalendar crate's parser.
//!
//! Feeds are untrusted: a document that fails to parse as a whole is an
//! error, but individual VEVENTs with missing or unreadable properties
//! degrade to partially-filled events instead of being dropped.

use icalendar::{
    parser::{read_calendar, unfold, Component},
    CalendarDateTime, DatePerhapsTime,
};
use thiserror::Error;

use crate::models::{Event, EventStatus, EventTime};

#[derive(Debug, Error)]
pub enum IcsError {
    #[error("invalid ICS document: {0}")]
    Malformed(String),
}

/// Parse an ICS document into the events of its VEVENT components.
///
/// Non-VEVENT components (VTODO, VTIMEZONE, ...) are skipped.
pub fn parse_events(content: &str) -> Result<Vec<Event>, IcsError> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| IcsError::Malformed(e.to_string()))?;

    Ok(calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(parse_event)
        .collect())
}

fn parse_event(vevent: &Component) -> Event {
    let text_prop = |name: &str| vevent.find_prop(name).map(|p| p.val.to_string());

    let time_prop = |name: &str| {
        vevent
            .find_prop(name)
            .and_then(|p| DatePerhapsTime::try_from(p).ok())
            .map(to_event_time)
    };

    let status = vevent
        .find_prop("STATUS")
        .map(|p| match p.val.as_ref() {
            "TENTATIVE" => EventStatus::Tentative,
            "CANCELLED" => EventStatus::Cancelled,
            _ => EventStatus::Confirmed,
        })
        .unwrap_or(EventStatus::Confirmed);

    Event {
        uid: text_prop("UID"),
        summary: text_prop("SUMMARY"),
        description: text_prop("DESCRIPTION"),
        location: text_prop("LOCATION"),
        start: time_prop("DTSTART"),
        end: time_prop("DTEND"),
        status,
    }
}

fn to_event_time(value: DatePerhapsTime) -> EventTime {
    match value {
        DatePerhapsTime::Date(d) => EventTime::Date(d),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => EventTime::DateTimeUtc(dt),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(dt)) => {
            EventTime::DateTimeFloating(dt)
        }
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            EventTime::DateTimeZoned {
                datetime: date_time,
                tzid,
            }
        }
    }
}
