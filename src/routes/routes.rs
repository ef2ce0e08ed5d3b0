//! Defines routes for the car API.
//!
//! ## Structure
//! - **Car endpoints** (nested under `/api`)
//!   - `POST   /api/create_cars`      — create a car
//!   - `DELETE /api/delete_cars/{id}` — delete a car
//!   - `GET    /api/get_cars/{id}`    — fetch one car
//!   - `GET    /api/cars`             — fetch every car
//!
//! - **Probes** (mounted at root)
//!   - `GET /healthz`, `GET /readyz`

use crate::{
    AppState,
    handlers::{
        car_handlers::{create_cars, delete_cars, get_car_by_id, get_cars, missing_id},
        health_handlers::{healthz, readyz},
    },
};
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Build the router for all car routes plus the probes.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/create_cars", post(create_cars))
        .route("/delete_cars/{id}", delete(delete_cars))
        .route("/delete_cars/", delete(missing_id))
        .route("/get_cars/{id}", get(get_car_by_id))
        .route("/get_cars/", get(missing_id))
        .route("/cars", get(get_cars))
}
