//! Shared data model for the calboard service: configuration types, the
//! per-calendar aggregation result, and the typed event produced at the
//! ICS parsing boundary.

pub mod ics;
pub mod models;
