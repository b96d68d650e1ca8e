pub mod auth;
pub mod chirp;
pub mod configuration;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod startup;
pub mod store;
pub mod telemetry;
