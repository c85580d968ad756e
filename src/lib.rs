pub mod cache;
pub mod geocode;
pub mod upstream;
pub mod watch;
pub mod web;
