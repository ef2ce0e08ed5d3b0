pub mod car_handlers;
pub mod health_handlers;
