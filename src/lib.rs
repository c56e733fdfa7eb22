pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod identifier;
pub mod infra;
pub mod logging;
pub mod pipeline;
pub mod tables;
pub mod types;
