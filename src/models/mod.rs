//! Data models for the car service.
//!
//! `Car` maps to the `cars` table via `sqlx::FromRow` and serializes as JSON
//! via `serde`; `NewCar` is the shape clients send on create.

pub mod car;
