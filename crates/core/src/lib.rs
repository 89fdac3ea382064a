//! Core business logic for Registrar.
//!
//! This crate contains pure enrollment rules with ZERO storage dependencies.
//! Storage is reached only through the traits in `enrollment::store`.
//!
//! # Modules
//!
//! - `enrollment` - Registration, grading, deletion and transcripts

pub mod enrollment;
