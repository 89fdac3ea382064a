//! Storage layer for Registrar.
//!
//! This crate provides:
//! - An in-memory registry implementing the `registrar-core` storage traits
//! - Cascading removal of students and courses

pub mod repositories;

pub use repositories::InMemoryRegistry;
