//! Repository implementations for data access.
//!
//! Repositories implement the storage traits of `registrar-core`, hiding the
//! in-memory representation from the rest of the application.

pub mod course;
pub mod enrollment;
pub mod registry;
pub mod student;

pub use registry::InMemoryRegistry;
