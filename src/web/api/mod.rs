pub mod error;
pub mod geocode;
pub mod health;
pub mod satellite;
