//! Shared errors, configuration, and wire types for Pulseboard.
//!
//! This crate provides common types used across all other crates:
//! - Pagination metadata returned by the metrics API
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
