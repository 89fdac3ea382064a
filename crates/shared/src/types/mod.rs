//! Common types used across the application.

pub mod academic_year;
pub mod id;
pub mod pagination;

pub use academic_year::{AcademicYear, AcademicYearError};
pub use id::*;
pub use pagination::{PageMeta, PageRequest, PageResponse};
