//! The persistence seam between HTTP handlers and the relational store.
//!
//! Handlers only ever see `dyn CarStore`, so the production Postgres gateway
//! and the in-process store used by tests are interchangeable.

use crate::models::car::{Car, NewCar};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store is unreachable or rejected the credentials.
    #[error("could not connect to the database")]
    Connection(#[source] sqlx::Error),

    /// Creating the `cars` table failed.
    #[error("could not apply the database schema")]
    Schema(#[source] sqlx::Error),

    #[error("database read failed")]
    Read(#[source] sqlx::Error),

    #[error("database write failed")]
    Write(#[source] sqlx::Error),

    #[error("car `{0}` not found")]
    NotFound(u64),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Entity-level operations over the `cars` table.
///
/// Each call is a single independent statement; no retries are attempted and
/// failures surface to the caller immediately.
#[async_trait]
pub trait CarStore: Send + Sync + 'static {
    /// Insert a car and return it with its newly assigned identifier.
    async fn create(&self, car: NewCar) -> StoreResult<Car>;

    /// Fetch a single car, or `StoreError::NotFound`.
    async fn find_by_id(&self, id: u64) -> StoreResult<Car>;

    /// Fetch every stored car. An empty store yields an empty vector.
    async fn find_all(&self) -> StoreResult<Vec<Car>>;

    /// Delete a car by id.
    ///
    /// Succeeds whether or not a matching row existed.
    async fn delete_by_id(&self, id: u64) -> StoreResult<()>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> StoreResult<()>;
}

/// Shared handle injected into the router.
pub type SharedStore = Arc<dyn CarStore>;
