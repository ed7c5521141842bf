use axum::{routing::get, Router};

use crate::handlers::{self, calendars, page};
use crate::AppState;

pub fn app_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Server-rendered board
        .route("/", get(page::index))
        // Aggregation API
        .route("/api/calendars", get(calendars::list_calendars))
}
