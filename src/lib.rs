pub mod config;
pub mod context;
pub mod db;
pub mod db_models;
pub mod errors;
pub mod repository;
pub mod routes;
pub mod startup;
pub mod telemetry;
