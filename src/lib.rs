//! Car service: a small JSON-over-HTTP CRUD API for car records stored in
//! PostgreSQL.
//!
//! The store is built once at startup and handed to [`app`]; handlers reach
//! it only through [`AppState`], so any [`CarStore`] can back the router.

use axum::Router;
use std::sync::Arc;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::car_store::{CarStore, SharedStore, StoreError};

/// State shared with every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: impl CarStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the complete application router around `state`.
pub fn app(state: AppState) -> Router {
    routes::routes::routes().with_state(state)
}
