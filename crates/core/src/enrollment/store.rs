//! Collaborator contracts consumed by the enrollment engine.
//!
//! These traits are implemented by the db crate. All calls are synchronous;
//! atomicity of a single write is the implementor's responsibility.

use registrar_shared::types::{AcademicYear, CourseCode, StudentIndex};
use thiserror::Error;

use super::types::{Course, Enrollment, EnrollmentKey, Student};

/// Failures reported by a storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with the same key already exists.
    #[error("Record already exists: {0}")]
    DuplicateKey(String),

    /// A foreign key points to a record that does not exist.
    #[error("Referenced record does not exist: {0}")]
    MissingReference(String),

    /// Any other backend failure.
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a backend error.
    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Durable keyed storage for enrollment records.
pub trait EnrollmentStore: Send + Sync {
    /// Insert a new enrollment. Rejects an existing key with `DuplicateKey`.
    fn create(&self, enrollment: Enrollment) -> Result<Enrollment, StoreError>;

    /// Point lookup by composite key.
    fn find_by_key(&self, key: &EnrollmentKey) -> Result<Option<Enrollment>, StoreError>;

    /// Replace the record with the same key. Returns false if none existed.
    fn update(&self, enrollment: &Enrollment) -> Result<bool, StoreError>;

    /// Remove the record with this key. Returns false if none existed.
    fn delete(&self, key: &EnrollmentKey) -> Result<bool, StoreError>;

    /// Full scan.
    fn find_all(&self) -> Result<Vec<Enrollment>, StoreError>;

    /// All enrollments of one student, in any academic year.
    fn find_by_student(&self, student: &StudentIndex) -> Result<Vec<Enrollment>, StoreError> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|e| &e.key.student_index == student)
            .collect())
    }

    /// All enrollments of one student in one academic year.
    fn find_by_student_and_year(
        &self,
        student: &StudentIndex,
        year: AcademicYear,
    ) -> Result<Vec<Enrollment>, StoreError> {
        Ok(self
            .find_by_student(student)?
            .into_iter()
            .filter(|e| e.key.academic_year == year)
            .collect())
    }
}

/// Read-only student lookups.
pub trait StudentDirectory: Send + Sync {
    /// Find a student by index number.
    fn get(&self, index: &StudentIndex) -> Result<Option<Student>, StoreError>;

    /// Check whether a student exists.
    fn exists(&self, index: &StudentIndex) -> Result<bool, StoreError> {
        Ok(self.get(index)?.is_some())
    }
}

/// Read-only course lookups.
pub trait CourseCatalog: Send + Sync {
    /// Find a course by code.
    fn get(&self, code: &CourseCode) -> Result<Option<Course>, StoreError>;

    /// Check whether a course exists.
    fn exists(&self, code: &CourseCode) -> Result<bool, StoreError> {
        Ok(self.get(code)?.is_some())
    }

    /// Credit points of a course, if it exists.
    fn credits(&self, code: &CourseCode) -> Result<Option<u32>, StoreError> {
        Ok(self.get(code)?.map(|c| c.ects))
    }
}
