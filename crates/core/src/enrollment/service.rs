//! Enrollment service.
//!
//! Single entry point over one store, directory and catalog. Rules live in
//! the individual components; this type wires them to shared handles and
//! adds the read-side lookups.

use std::sync::Arc;

use registrar_shared::types::{AcademicYear, PageRequest, PageResponse, StaffId, StudentIndex};

use super::deletion::EnrollmentDeletionGuard;
use super::error::EnrollmentError;
use super::grading::GradingEngine;
use super::lifecycle::EnrollmentLifecycleManager;
use super::store::{CourseCatalog, EnrollmentStore, StudentDirectory};
use super::transcript::TranscriptAggregator;
use super::types::{Enrollment, EnrollmentKey, StudentReport};

/// Service for enrollment operations.
pub struct EnrollmentService<S, D, C> {
    store: Arc<S>,
    lifecycle: EnrollmentLifecycleManager<S, D, C>,
    grading: GradingEngine<S>,
    deletion: EnrollmentDeletionGuard<S>,
    transcript: TranscriptAggregator<S, D, C>,
}

impl<S, D, C> EnrollmentService<S, D, C>
where
    S: EnrollmentStore,
    D: StudentDirectory,
    C: CourseCatalog,
{
    /// Create a new enrollment service.
    #[must_use]
    pub fn new(store: Arc<S>, students: Arc<D>, courses: Arc<C>) -> Self {
        Self {
            lifecycle: EnrollmentLifecycleManager::new(
                Arc::clone(&store),
                Arc::clone(&students),
                Arc::clone(&courses),
            ),
            grading: GradingEngine::new(Arc::clone(&store)),
            deletion: EnrollmentDeletionGuard::new(Arc::clone(&store)),
            transcript: TranscriptAggregator::new(Arc::clone(&store), students, courses),
            store,
        }
    }

    /// See [`EnrollmentLifecycleManager::register_enrollment`].
    ///
    /// # Errors
    ///
    /// Propagates the lifecycle manager's errors.
    pub fn register_enrollment(
        &self,
        key: EnrollmentKey,
        acting_staff: &StaffId,
    ) -> Result<Enrollment, EnrollmentError> {
        self.lifecycle.register_enrollment(key, acting_staff)
    }

    /// See [`GradingEngine::enter_or_update_grade`].
    ///
    /// # Errors
    ///
    /// Propagates the grading engine's errors.
    pub fn enter_or_update_grade(
        &self,
        key: &EnrollmentKey,
        new_grade: Option<i32>,
        reason: Option<&str>,
        acting_staff: &StaffId,
    ) -> Result<Enrollment, EnrollmentError> {
        self.grading
            .enter_or_update_grade(key, new_grade, reason, acting_staff)
    }

    /// See [`EnrollmentDeletionGuard::delete_enrollment`].
    ///
    /// # Errors
    ///
    /// Propagates the deletion guard's errors.
    pub fn delete_enrollment(&self, key: &EnrollmentKey) -> Result<(), EnrollmentError> {
        self.deletion.delete_enrollment(key)
    }

    /// See [`TranscriptAggregator::generate_report`].
    ///
    /// # Errors
    ///
    /// Propagates the aggregator's errors.
    pub fn generate_report(
        &self,
        student_index: &StudentIndex,
    ) -> Result<StudentReport, EnrollmentError> {
        self.transcript.generate_report(student_index)
    }

    /// Point lookup of one enrollment.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the store fails.
    pub fn get_enrollment(&self, key: &EnrollmentKey) -> Result<Option<Enrollment>, EnrollmentError> {
        Ok(self.store.find_by_key(key)?)
    }

    /// Page through every enrollment in key order.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the store fails.
    pub fn list_enrollments(
        &self,
        request: &PageRequest,
    ) -> Result<PageResponse<Enrollment>, EnrollmentError> {
        let mut all = self.store.find_all()?;
        all.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(PageResponse::paginate(all, request))
    }

    /// Enrollments of one student in one academic year, by course code.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the store fails.
    pub fn list_for_student_year(
        &self,
        student_index: &StudentIndex,
        year: AcademicYear,
    ) -> Result<Vec<Enrollment>, EnrollmentError> {
        let mut found = self.store.find_by_student_and_year(student_index, year)?;
        found.sort_by(|a, b| a.key.course_code.cmp(&b.key.course_code));
        Ok(found)
    }
}
