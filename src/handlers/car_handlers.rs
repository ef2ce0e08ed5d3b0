//! HTTP handlers for the car endpoints.
//!
//! Each handler parses its input, makes exactly one call on the shared
//! `CarStore`, and translates the outcome into a status code and a JSON
//! body. Store failures are logged here and collapsed into one generic
//! message per endpoint.

use crate::{
    AppState,
    errors::{ApiResponse, AppError},
    models::car::{Car, NewCar},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::{debug, error, info, warn};

const ID_EMPTY: &str = "id cannot be empty";

/// `POST /api/create_cars`
pub async fn create_cars(
    State(state): State<AppState>,
    payload: Result<Json<NewCar>, JsonRejection>,
) -> Result<ApiResponse<Car>, AppError> {
    let Json(new_car) = payload.map_err(|rejection| {
        warn!("create_cars: unreadable body: {}", rejection.body_text());
        AppError::unprocessable("request failed")
    })?;

    let car = state.store.create(new_car).await.map_err(|err| {
        error!("create_cars: {:?}", err);
        AppError::bad_request("an error occurred while creating the car")
    })?;

    info!("created car {}", car.id);
    Ok(ApiResponse::with_data("car created successfully", car))
}

/// `DELETE /api/delete_cars/{id}`
///
/// Reports success even when no car had that id.
pub async fn delete_cars(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    require_id(&id)?;
    let id = parse_id(&id).ok_or_else(|| {
        warn!("delete_cars: `{}` is not a car id", id);
        AppError::bad_request("could not delete car")
    })?;

    state.store.delete_by_id(id).await.map_err(|err| {
        error!("delete_cars: {:?}", err);
        AppError::bad_request("could not delete car")
    })?;

    info!("deleted car {}", id);
    Ok(ApiResponse::message("car deleted successfully"))
}

/// `GET /api/get_cars/{id}`
pub async fn get_car_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Car>, AppError> {
    require_id(&id)?;
    let id = parse_id(&id).ok_or_else(|| {
        warn!("get_car_by_id: `{}` is not a car id", id);
        AppError::bad_request("could not find car")
    })?;

    let car = state.store.find_by_id(id).await.map_err(|err| {
        warn!("get_car_by_id: {:?}", err);
        AppError::bad_request("could not find car")
    })?;

    Ok(ApiResponse::with_data("car found successfully", car))
}

/// `GET /api/cars`
pub async fn get_cars(State(state): State<AppState>) -> Result<ApiResponse<Vec<Car>>, AppError> {
    let cars = state.store.find_all().await.map_err(|err| {
        error!("get_cars: {:?}", err);
        AppError::bad_request("an error occurred while fetching the cars")
    })?;

    debug!("fetched {} cars", cars.len());
    Ok(ApiResponse::with_data("cars fetched successfully", cars))
}

/// `GET /api/get_cars/` and `DELETE /api/delete_cars/`
///
/// An empty segment never matches `{id}`, so these paths get their own
/// route. Answers 500, same as a blank `{id}`.
pub async fn missing_id() -> AppError {
    AppError::internal(ID_EMPTY)
}

/// Blank ids (empty or whitespace only) are rejected before parsing.
fn require_id(raw: &str) -> Result<(), AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::internal(ID_EMPTY));
    }
    Ok(())
}

/// Plain decimal digits only: no sign, no surrounding whitespace.
fn parse_id(raw: &str) -> Option<u64> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn blank_ids_are_rejected_as_empty() {
        for raw in ["", "   "] {
            let err = require_id(raw).unwrap_err();
            assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.message, ID_EMPTY);
        }
        assert!(require_id(" 12 ").is_ok());
    }

    #[test]
    fn ids_must_be_bare_digits() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id("0"), Some(0));
        for raw in [" 12", "12 ", "+0", "-1", "1e3", "abc", "18446744073709551616"] {
            assert_eq!(parse_id(raw), None, "{raw:?}");
        }
    }
}
