//! Enrollment lifecycle and transcript engine.
//!
//! This module implements registration of students into courses, grade
//! entry and correction, guarded deletion, and transcript summaries.
//!
//! # Modules
//!
//! - `types` - Enrollment domain types (Grade, EnrollmentKey, Enrollment)
//! - `error` - Enrollment error types and categories
//! - `store` - Collaborator traits for storage and lookups
//! - `validation` - Field and record validation
//! - `lifecycle` - Enrollment creation rules
//! - `grading` - Grade entry and correction state machine
//! - `deletion` - Passed-enrollment deletion lock
//! - `transcript` - Credit and average aggregation
//! - `service` - Facade over all components

pub mod deletion;
pub mod error;
pub mod grading;
pub mod lifecycle;
pub mod service;
pub mod store;
pub mod transcript;
pub mod types;
pub mod validation;

#[cfg(test)]
mod grading_props;
#[cfg(test)]
mod lifecycle_props;
#[cfg(test)]
mod testing;
#[cfg(test)]
mod transcript_props;

pub use deletion::EnrollmentDeletionGuard;
pub use error::{EnrollmentError, ErrorKind};
pub use grading::{GradeTransition, GradingEngine, check_single_pass};
pub use lifecycle::{EnrollmentLifecycleManager, check_history};
pub use service::EnrollmentService;
pub use store::{CourseCatalog, EnrollmentStore, StoreError, StudentDirectory};
pub use transcript::{CreditTally, TranscriptAggregator};
pub use types::{
    Course, Enrollment, EnrollmentKey, Grade, MAX_GRADE, MIN_GRADE, NO_PASSED_AVERAGE,
    PASSING_GRADE, Student, StudentReport,
};
pub use validation::{validate_course, validate_student};
