//! src/services/postgres_store.rs
//!
//! PgCarStore — the production `CarStore`, backed by a PostgreSQL pool.
//! The pool is created once at startup and shared by every request; sqlx
//! handles concurrent access internally.

use crate::{
    config::DatabaseConfig,
    models::car::{Car, NewCar},
    services::car_store::{CarStore, StoreError, StoreResult},
};
use async_trait::async_trait;
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use std::time::Duration;
use tracing::{debug, info};

/// DDL applied by [`PgCarStore::ensure_schema`].
const SCHEMA_SQL: &str = include_str!("../../migrations/0001_create_cars.sql");

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct PgCarStore {
    pool: PgPool,
}

impl PgCarStore {
    /// Open a connection pool and verify the store is reachable.
    ///
    /// Fails with `StoreError::Connection` when the server cannot be reached
    /// or refuses the credentials.
    pub async fn connect(cfg: &DatabaseConfig) -> StoreResult<Self> {
        let options = PgConnectOptions::new()
            .host(&cfg.host)
            .port(cfg.port)
            .username(&cfg.user)
            .password(&cfg.password)
            .database(&cfg.database)
            .ssl_mode(cfg.ssl_mode);

        debug!(
            "Connecting to postgres at {}:{}/{}",
            cfg.host, cfg.port, cfg.database
        );

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(StoreError::Connection)?;

        Ok(Self::from_pool(pool))
    }

    /// Wrap an already-established pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `cars` table if it does not exist yet.
    ///
    /// Every statement is guarded with `IF NOT EXISTS`, so running this
    /// against an up-to-date schema changes nothing.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        let statements = SCHEMA_SQL
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        info!("Applying {} schema statements...", statements.len());

        for stmt in statements {
            debug!("Executing schema SQL: {}", stmt);
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .map_err(StoreError::Schema)?;
        }

        Ok(())
    }
}

#[async_trait]
impl CarStore for PgCarStore {
    async fn create(&self, car: NewCar) -> StoreResult<Car> {
        sqlx::query_as::<_, Car>(
            "INSERT INTO cars (company, model, color)
             VALUES ($1, $2, $3)
             RETURNING id, company, model, color",
        )
        .bind(car.company)
        .bind(car.model)
        .bind(car.color)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::Write)
    }

    async fn find_by_id(&self, id: u64) -> StoreResult<Car> {
        // BIGSERIAL never exceeds i64::MAX, so a larger id cannot match a row.
        let key = i64::try_from(id).map_err(|_| StoreError::NotFound(id))?;

        sqlx::query_as::<_, Car>("SELECT id, company, model, color FROM cars WHERE id = $1")
            .bind(key)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => StoreError::NotFound(id),
                other => StoreError::Read(other),
            })
    }

    async fn find_all(&self) -> StoreResult<Vec<Car>> {
        sqlx::query_as::<_, Car>("SELECT id, company, model, color FROM cars ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::Read)
    }

    async fn delete_by_id(&self, id: u64) -> StoreResult<()> {
        let Ok(key) = i64::try_from(id) else {
            return Ok(());
        };

        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Write)?;

        debug!("delete car {} affected {} rows", id, result.rows_affected());
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(StoreError::Read)
    }
}

#[cfg(test)]
mod tests {
    use super::SCHEMA_SQL;

    #[test]
    fn schema_is_idempotent_ddl() {
        let normalized = SCHEMA_SQL
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();
        assert!(normalized.contains("create table if not exists cars"));
        assert!(normalized.contains("id bigserial primary key"));
    }
}
