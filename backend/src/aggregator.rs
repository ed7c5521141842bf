//! Concurrent fan-out over the configured calendar feeds.
//!
//! Every feed is fetched and parsed in parallel; the joined output always
//! has exactly one entry per configured source, in configuration order. A
//! feed that cannot be fetched or parsed is logged and degraded to an empty
//! event list so one broken calendar never takes down the response.

use std::time::Duration;

use thiserror::Error;

use calboard_shared::ics::{self, IcsError};
use calboard_shared::models::{CalendarResult, CalendarSource, Event};

#[derive(Debug, Error)]
enum FeedError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Parse(#[from] IcsError),
}

/// Fetch and parse every configured feed concurrently.
///
/// Completion is gated on the slowest feed; `timeout` bounds each fetch
/// when the operator configured one.
pub async fn aggregate(
    client: &reqwest::Client,
    sources: &[CalendarSource],
    timeout: Option<Duration>,
) -> Vec<CalendarResult> {
    let fetches = sources
        .iter()
        .map(|source| load_feed(client, source, timeout));

    futures::future::join_all(fetches).await
}

async fn load_feed(
    client: &reqwest::Client,
    source: &CalendarSource,
    timeout: Option<Duration>,
) -> CalendarResult {
    let events = match fetch_events(client, source, timeout).await {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!("Failed to load calendar {}: {}", source.name, e);
            Vec::new()
        }
    };

    CalendarResult {
        name: source.name.clone(),
        events,
    }
}

async fn fetch_events(
    client: &reqwest::Client,
    source: &CalendarSource,
    timeout: Option<Duration>,
) -> Result<Vec<Event>, FeedError> {
    let mut request = client.get(&source.ics_url);
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    let response = request.send().await?;
    if !response.status().is_success() {
        return Err(FeedError::Status(response.status()));
    }

    let body = response.text().await?;
    Ok(ics::parse_events(&body)?)
}
