//! Server-rendered calendar board.
//!
//! The board honors the access gate; configuration failures abort the
//! request, but a document without a calendars list renders an empty board.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Html,
};

use calboard_shared::models::{CalendarResult, Event};

use crate::aggregator;
use crate::auth::{self, AuthQuery};
use crate::error::ApiResult;
use crate::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct BoardTemplate {
    calendars: Vec<BoardCalendar>,
}

/// Display model handed to the template, pre-formatted to plain strings.
struct BoardCalendar {
    name: String,
    events: Vec<BoardEvent>,
}

struct BoardEvent {
    summary: String,
    when: Option<String>,
    location: Option<String>,
}

impl From<CalendarResult> for BoardCalendar {
    fn from(result: CalendarResult) -> Self {
        Self {
            name: result.name,
            events: result.events.into_iter().map(BoardEvent::from).collect(),
        }
    }
}

impl From<Event> for BoardEvent {
    fn from(event: Event) -> Self {
        let when = match (&event.start, &event.end) {
            (Some(start), Some(end)) => Some(format!("{} - {}", start, end)),
            (Some(start), None) => Some(start.to_string()),
            (None, _) => None,
        };

        Self {
            summary: event.summary.unwrap_or_else(|| "(untitled)".to_string()),
            when,
            location: event.location,
        }
    }
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AuthQuery>,
) -> ApiResult<Html<String>> {
    let config = state.config.resolve()?;
    auth::check_access(config.auth_token.as_deref(), &headers, &query)?;

    let timeout = config.fetch_timeout();
    let results = match config.calendars {
        Some(sources) => aggregator::aggregate(&state.http, &sources, timeout).await,
        None => {
            // The board stays up with nothing on it rather than erroring.
            tracing::error!("Failed to load calendars: configuration has no calendars list");
            Vec::new()
        }
    };

    let template = BoardTemplate {
        calendars: results.into_iter().map(BoardCalendar::from).collect(),
    };

    Ok(Html(template.render()?))
}
