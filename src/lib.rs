//! Library entrypoint for the demo trading ledger.
//!
//! The ledger core lives in `services`; `controllers` and `routes` are a thin
//! JSON layer over it. Integration tests under `tests/` build an `AppState`
//! around the in-memory store and a fake price source.

pub mod config;
pub mod error;
pub mod models;

#[path = "middleware/auth.rs"]
pub mod auth;

pub mod services;

pub mod controllers;
pub mod routes;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub ledger: Arc<services::ledger::Ledger>,
}
