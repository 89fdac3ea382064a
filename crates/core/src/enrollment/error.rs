//! Enrollment error types.
//!
//! Every rule violation is reported through `EnrollmentError`; callers that
//! only care about the category use `EnrollmentError::kind`.

use std::fmt;

use registrar_shared::AppError;
use registrar_shared::types::{AcademicYearError, CourseCode, StudentIndex};
use thiserror::Error;

use super::store::StoreError;
use super::types::EnrollmentKey;

/// Category of an enrollment failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input. Never partially applied.
    Validation,
    /// A referenced student, course or enrollment does not exist.
    NotFound,
    /// The operation would break a uniqueness or already-passed rule.
    Conflict,
    /// The operation would break a protection rule.
    Integrity,
    /// A collaborator failed; surfaced unchanged.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Integrity => "integrity",
            Self::Storage => "storage",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during enrollment operations.
#[derive(Debug, Error)]
pub enum EnrollmentError {
    // ========== Validation Errors ==========
    /// A required identifier is empty.
    #[error("Required field is missing: {0}")]
    MissingField(&'static str),

    /// Academic year is empty or malformed.
    #[error(transparent)]
    InvalidAcademicYear(#[from] AcademicYearError),

    /// Grade lies outside the accepted range.
    #[error("Grade must be between 5 and 10, got {0}")]
    GradeOutOfRange(i32),

    /// No grade was supplied for an ungraded enrollment.
    #[error("A grade is required for the first grade entry")]
    GradeRequired,

    /// Correcting an existing grade without a reason.
    #[error("A reason is required to change an existing grade")]
    ChangeReasonRequired,

    /// Record failed field validation.
    #[error("Invalid {entity}: {message}")]
    InvalidRecord {
        /// Kind of record being validated.
        entity: &'static str,
        /// What is wrong with it.
        message: String,
    },

    // ========== Not Found Errors ==========
    /// Student does not exist.
    #[error("Student not found: {0}")]
    StudentNotFound(StudentIndex),

    /// Course does not exist.
    #[error("Course not found: {0}")]
    CourseNotFound(CourseCode),

    /// Enrollment does not exist.
    #[error("Enrollment not found: {0}")]
    EnrollmentNotFound(EnrollmentKey),

    // ========== Conflict Errors ==========
    /// Student already passed the course in some academic year.
    #[error("Student {student_index} already passed course {course_code}")]
    AlreadyPassed {
        /// Student index number.
        student_index: StudentIndex,
        /// Course code.
        course_code: CourseCode,
    },

    /// The exact enrollment already exists.
    #[error("Duplicate enrollment: {0}")]
    DuplicateEnrollment(EnrollmentKey),

    // ========== Integrity Errors ==========
    /// Passed enrollments cannot be deleted.
    #[error("Cannot delete a passed enrollment: {0}")]
    PassedEnrollmentLocked(EnrollmentKey),

    // ========== Storage Errors ==========
    /// Collaborator failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EnrollmentError {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_)
            | Self::InvalidAcademicYear(_)
            | Self::GradeOutOfRange(_)
            | Self::GradeRequired
            | Self::ChangeReasonRequired
            | Self::InvalidRecord { .. } => ErrorKind::Validation,

            Self::StudentNotFound(_) | Self::CourseNotFound(_) | Self::EnrollmentNotFound(_) => {
                ErrorKind::NotFound
            }

            Self::AlreadyPassed { .. } | Self::DuplicateEnrollment(_) => ErrorKind::Conflict,

            Self::PassedEnrollmentLocked(_) => ErrorKind::Integrity,

            Self::Store(_) => ErrorKind::Storage,
        }
    }

    /// Returns the HTTP-style status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Integrity => 422,
            ErrorKind::Storage => 500,
        }
    }

    /// Returns the stable error code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidAcademicYear(_) => "INVALID_ACADEMIC_YEAR",
            Self::GradeOutOfRange(_) => "GRADE_OUT_OF_RANGE",
            Self::GradeRequired => "GRADE_REQUIRED",
            Self::ChangeReasonRequired => "CHANGE_REASON_REQUIRED",
            Self::InvalidRecord { .. } => "INVALID_RECORD",
            Self::StudentNotFound(_) => "STUDENT_NOT_FOUND",
            Self::CourseNotFound(_) => "COURSE_NOT_FOUND",
            Self::EnrollmentNotFound(_) => "ENROLLMENT_NOT_FOUND",
            Self::AlreadyPassed { .. } => "ALREADY_PASSED",
            Self::DuplicateEnrollment(_) => "DUPLICATE_ENROLLMENT",
            Self::PassedEnrollmentLocked(_) => "PASSED_ENROLLMENT_LOCKED",
            Self::Store(_) => "STORAGE_ERROR",
        }
    }

    /// Create an invalid record error.
    #[must_use]
    pub fn invalid_record(entity: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            entity,
            message: message.into(),
        }
    }
}

impl From<EnrollmentError> for AppError {
    fn from(err: EnrollmentError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Validation => Self::Validation(message),
            ErrorKind::NotFound => Self::NotFound(message),
            ErrorKind::Conflict => Self::Conflict(message),
            ErrorKind::Integrity => Self::BusinessRule(message),
            ErrorKind::Storage => Self::Database(message),
        }
    }
}
