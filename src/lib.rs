pub mod api;
pub mod config;
pub mod detection;
pub mod error;
pub mod extraction;
pub mod models;
pub mod render;
pub mod shutdown;
pub mod workers;
