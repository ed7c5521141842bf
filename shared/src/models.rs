use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One configured remote feed: a display name plus the URL of its ICS
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSource {
    pub name: String,
    pub ics_url: String,
}

/// Operator-provided configuration, loaded fresh for every request.
///
/// `calendars` stays optional so that a document missing the field is
/// distinguishable from one configuring an empty list: the former is an
/// aggregation setup failure, the latter just yields an empty board.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub auth_token: Option<String>,
    pub calendars: Option<Vec<CalendarSource>>,
    pub fetch_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Per-fetch timeout, when the operator configured one. Absent means a
    /// slow feed is waited on indefinitely.
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

/// Aggregation output for one configured calendar. `events` is empty when
/// the feed could not be fetched or parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResult {
    pub name: String,
    pub events: Vec<Event>,
}

/// A calendar event with named fields, produced from a feed's VEVENTs.
///
/// Every field except `status` is optional: remote feeds frequently omit
/// properties, and a missing property never drops the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    pub status: EventStatus,
}

/// An ICS time value. Feeds mix all-day dates, UTC datetimes, floating
/// local datetimes, and TZID-qualified datetimes; all four survive here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
    DateTimeFloating(NaiveDateTime),
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            EventTime::DateTimeUtc(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M UTC")),
            EventTime::DateTimeFloating(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            EventTime::DateTimeZoned { datetime, tzid } => {
                write!(f, "{} {}", datetime.format("%Y-%m-%d %H:%M"), tzid)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_uses_camel_case_keys() {
        let json = r#"{
            "authToken": "sekrit",
            "calendars": [{"name": "Team", "icsUrl": "https://example.com/team.ics"}],
            "fetchTimeoutSecs": 10
        }"#;

        let config: AppConfig = serde_json::from_str(json).expect("should parse");
        assert_eq!(config.auth_token.as_deref(), Some("sekrit"));
        assert_eq!(config.fetch_timeout(), Some(Duration::from_secs(10)));

        let calendars = config.calendars.expect("calendars should be present");
        assert_eq!(calendars.len(), 1);
        assert_eq!(calendars[0].name, "Team");
        assert_eq!(calendars[0].ics_url, "https://example.com/team.ics");
    }

    #[test]
    fn test_config_without_calendars_field_stays_none() {
        let config: AppConfig = serde_json::from_str("{}").expect("should parse");
        assert!(config.auth_token.is_none());
        assert!(config.calendars.is_none());
        assert!(config.fetch_timeout().is_none());
    }

    #[test]
    fn test_empty_calendars_list_is_not_none() {
        let config: AppConfig =
            serde_json::from_str(r#"{"calendars": []}"#).expect("should parse");
        assert_eq!(config.calendars, Some(vec![]));
    }

    #[test]
    fn test_calendar_result_serializes_name_and_events() {
        let result = CalendarResult {
            name: "Team".to_string(),
            events: vec![],
        };

        let json = serde_json::to_value(&result).expect("should serialize");
        assert_eq!(json["name"], "Team");
        assert_eq!(json["events"], serde_json::json!([]));
    }

    #[test]
    fn test_event_time_display() {
        let date = EventTime::Date(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(date.to_string(), "2024-01-08");

        let utc = EventTime::DateTimeUtc(
            NaiveDate::from_ymd_opt(2024, 1, 8)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
                .and_utc(),
        );
        assert_eq!(utc.to_string(), "2024-01-08 10:30 UTC");

        let zoned = EventTime::DateTimeZoned {
            datetime: NaiveDate::from_ymd_opt(2024, 1, 8)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            tzid: "Europe/Stockholm".to_string(),
        };
        assert_eq!(zoned.to_string(), "2024-01-08 10:30 Europe/Stockholm");
    }
}
