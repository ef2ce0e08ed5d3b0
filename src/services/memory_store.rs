//! In-process `CarStore` used as a substitute for PostgreSQL in tests.

use crate::{
    models::car::{Car, NewCar},
    services::car_store::{CarStore, StoreError, StoreResult},
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Keeps cars in a `BTreeMap` keyed by id.
///
/// Ids start at 1 and are never reused, even after a delete, matching a
/// `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct MemoryCarStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: u64,
    cars: BTreeMap<u64, Car>,
}

impl MemoryCarStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CarStore for MemoryCarStore {
    async fn create(&self, car: NewCar) -> StoreResult<Car> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let stored = car.with_id(inner.last_id);
        inner.cars.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: u64) -> StoreResult<Car> {
        self.inner
            .read()
            .await
            .cars
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn find_all(&self) -> StoreResult<Vec<Car>> {
        Ok(self.inner.read().await.cars.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: u64) -> StoreResult<()> {
        self.inner.write().await.cars.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toyota() -> NewCar {
        NewCar {
            company: Some("Toyota".into()),
            model: Some("Corolla".into()),
            color: Some("red".into()),
        }
    }

    #[tokio::test]
    async fn ids_increase_and_are_not_reused() {
        let store = MemoryCarStore::new();
        let first = store.create(toyota()).await.unwrap();
        let second = store.create(toyota()).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        store.delete_by_id(second.id).await.unwrap();
        let third = store.create(NewCar::default()).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn find_by_id_reports_missing_rows() {
        let store = MemoryCarStore::new();
        let err = store.find_by_id(42).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));
    }

    #[tokio::test]
    async fn delete_of_unknown_id_succeeds() {
        let store = MemoryCarStore::new();
        store.delete_by_id(5).await.unwrap();
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
