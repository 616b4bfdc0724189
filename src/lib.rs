pub mod auth_jwt;
pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod validations;
