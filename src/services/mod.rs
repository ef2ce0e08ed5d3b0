pub mod car_store;
pub mod memory_store;
pub mod postgres_store;
