pub mod auth;
pub mod configuration;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod startup;
pub mod telemetry;
