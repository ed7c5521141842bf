//! JSON aggregation endpoint.

use axum::{extract::State, http::StatusCode, Json};

use calboard_shared::models::CalendarResult;

use crate::aggregator;
use crate::AppState;

/// GET /api/calendars
///
/// Setup failures (unresolvable configuration, a document without a
/// calendars list) collapse to an empty array with a 500 status. Per-feed
/// failures never reach this level; the aggregator already degraded them to
/// empty event lists.
pub async fn list_calendars(
    State(state): State<AppState>,
) -> (StatusCode, Json<Vec<CalendarResult>>) {
    let config = match state.config.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load calendars: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::new()));
        }
    };

    let timeout = config.fetch_timeout();
    let Some(sources) = config.calendars else {
        tracing::error!("Failed to load calendars: configuration has no calendars list");
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::new()));
    };

    let results = aggregator::aggregate(&state.http, &sources, timeout).await;
    (StatusCode::OK, Json(results))
}
