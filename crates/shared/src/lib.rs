//! Shared types, errors, and configuration for Registrar.
//!
//! This crate provides common types used across all other crates:
//! - Typed identifiers for students, courses, staff and academic years
//! - Pagination types for list operations
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
