//! Enrollment creation and the rules that guard it.

use std::sync::Arc;

use registrar_shared::types::StaffId;
use tracing::{debug, info};

use super::error::EnrollmentError;
use super::store::{CourseCatalog, EnrollmentStore, StoreError, StudentDirectory};
use super::types::{Enrollment, EnrollmentKey};
use super::validation::require_staff;

/// Validates and creates new enrollment records.
pub struct EnrollmentLifecycleManager<S, D, C> {
    store: Arc<S>,
    students: Arc<D>,
    courses: Arc<C>,
}

impl<S, D, C> EnrollmentLifecycleManager<S, D, C>
where
    S: EnrollmentStore,
    D: StudentDirectory,
    C: CourseCatalog,
{
    /// Create a new lifecycle manager.
    #[must_use]
    pub fn new(store: Arc<S>, students: Arc<D>, courses: Arc<C>) -> Self {
        Self {
            store,
            students,
            courses,
        }
    }

    /// Register a student into a course for an academic year.
    ///
    /// Checks run in this order:
    /// 1. identifiers and acting staff are non-blank
    /// 2. student exists, then course exists
    /// 3. the student has not passed the course in any year
    /// 4. the exact enrollment does not exist yet
    ///
    /// # Errors
    ///
    /// Returns `MissingField` for blank input, `StudentNotFound` /
    /// `CourseNotFound` for unknown references, `AlreadyPassed` or
    /// `DuplicateEnrollment` for conflicts, and `Store` if a collaborator
    /// fails.
    pub fn register_enrollment(
        &self,
        key: EnrollmentKey,
        acting_staff: &StaffId,
    ) -> Result<Enrollment, EnrollmentError> {
        key.validate()?;
        require_staff(acting_staff)?;

        if !self.students.exists(&key.student_index)? {
            return Err(EnrollmentError::StudentNotFound(key.student_index));
        }
        if !self.courses.exists(&key.course_code)? {
            return Err(EnrollmentError::CourseNotFound(key.course_code));
        }

        let history = self.store.find_by_student(&key.student_index)?;
        debug!(
            student = %key.student_index,
            existing = history.len(),
            "Checking enrollment history"
        );
        check_history(&key, &history)?;

        let enrollment = Enrollment::new(key.clone(), acting_staff.clone());
        match self.store.create(enrollment) {
            Ok(created) => {
                info!(
                    enrollment = %created.key,
                    added_by = %acting_staff,
                    "Enrollment registered"
                );
                Ok(created)
            }
            Err(StoreError::DuplicateKey(_)) => Err(EnrollmentError::DuplicateEnrollment(key)),
            Err(err) => Err(err.into()),
        }
    }
}

/// Check a new key against the student's existing enrollments.
///
/// A passed enrollment in any academic year is reported before a same-year
/// duplicate, regardless of the order of `history`.
///
/// # Errors
///
/// Returns `AlreadyPassed` or `DuplicateEnrollment`.
pub fn check_history(key: &EnrollmentKey, history: &[Enrollment]) -> Result<(), EnrollmentError> {
    let same_course = || {
        history.iter().filter(|e| {
            e.key.student_index == key.student_index && e.key.course_code == key.course_code
        })
    };

    if same_course().any(Enrollment::is_passed) {
        return Err(EnrollmentError::AlreadyPassed {
            student_index: key.student_index.clone(),
            course_code: key.course_code.clone(),
        });
    }

    if same_course().any(|e| e.key.academic_year == key.academic_year) {
        return Err(EnrollmentError::DuplicateEnrollment(key.clone()));
    }

    Ok(())
}
