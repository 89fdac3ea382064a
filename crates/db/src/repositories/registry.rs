//! Shared in-memory registry state.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use registrar_core::enrollment::{Course, Enrollment, EnrollmentKey, Student};
use registrar_shared::types::{CourseCode, StudentIndex};

/// Thread-safe in-memory registry of students, courses and enrollments.
///
/// Implements `StudentDirectory`, `CourseCatalog` and `EnrollmentStore`, so a
/// single `Arc<InMemoryRegistry>` can back every engine component.
///
/// Locks are always taken in the order students, courses, enrollments.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    pub(crate) students: RwLock<BTreeMap<StudentIndex, Student>>,
    pub(crate) courses: RwLock<BTreeMap<CourseCode, Course>>,
    pub(crate) enrollments: RwLock<BTreeMap<EnrollmentKey, Enrollment>>,
}

impl InMemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored enrollments.
    #[must_use]
    pub fn enrollment_count(&self) -> usize {
        self.enrollments.read().len()
    }

    /// Number of stored students.
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.students.read().len()
    }

    /// Number of stored courses.
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.read().len()
    }
}
