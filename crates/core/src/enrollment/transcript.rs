//! Transcript aggregation.

use std::sync::Arc;

use registrar_shared::types::StudentIndex;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::error::EnrollmentError;
use super::store::{CourseCatalog, EnrollmentStore, StudentDirectory};
use super::types::{Enrollment, Grade, NO_PASSED_AVERAGE, StudentReport};

/// Running totals over a student's passed enrollments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreditTally {
    /// Sum of credit points.
    pub total_credits: u32,
    /// Sum of passing grades.
    pub grade_sum: u32,
    /// Number of passing grades counted.
    pub passed_count: usize,
}

impl CreditTally {
    /// Count one passed course.
    pub fn record(&mut self, grade: Grade, ects: u32) {
        self.total_credits = self.total_credits.saturating_add(ects);
        self.grade_sum += u32::from(grade.value());
        self.passed_count += 1;
    }

    /// Mean of the counted grades, or `NO_PASSED_AVERAGE` if none.
    #[must_use]
    pub fn average(&self) -> Decimal {
        if self.passed_count == 0 {
            return NO_PASSED_AVERAGE;
        }
        Decimal::from(self.grade_sum) / Decimal::from(self.passed_count)
    }
}

/// Builds read-only transcript summaries.
pub struct TranscriptAggregator<S, D, C> {
    store: Arc<S>,
    students: Arc<D>,
    courses: Arc<C>,
}

impl<S, D, C> TranscriptAggregator<S, D, C>
where
    S: EnrollmentStore,
    D: StudentDirectory,
    C: CourseCatalog,
{
    /// Create a new transcript aggregator.
    #[must_use]
    pub fn new(store: Arc<S>, students: Arc<D>, courses: Arc<C>) -> Self {
        Self {
            store,
            students,
            courses,
        }
    }

    /// Summarize a student's enrollment history.
    ///
    /// Every enrollment is listed, ordered by academic year then course
    /// code. Only passing enrollments whose course still resolves count
    /// towards credits and the average.
    ///
    /// # Errors
    ///
    /// Returns `StudentNotFound` for an unknown student and `Store` if a
    /// collaborator fails.
    pub fn generate_report(
        &self,
        student_index: &StudentIndex,
    ) -> Result<StudentReport, EnrollmentError> {
        if student_index.is_blank() {
            return Err(EnrollmentError::MissingField("student_index"));
        }

        let student = self
            .students
            .get(student_index)?
            .ok_or_else(|| EnrollmentError::StudentNotFound(student_index.clone()))?;

        let mut enrollments = self.store.find_by_student(student_index)?;
        enrollments.sort_by(|a, b| {
            a.key
                .academic_year
                .cmp(&b.key.academic_year)
                .then_with(|| a.key.course_code.cmp(&b.key.course_code))
        });

        let tally = self.tally(&enrollments)?;
        debug!(
            student = %student_index,
            enrollments = enrollments.len(),
            passed = tally.passed_count,
            credits = tally.total_credits,
            "Transcript generated"
        );

        Ok(StudentReport {
            student,
            enrollments,
            total_credits: tally.total_credits,
            average_grade: tally.average(),
            passed_count: tally.passed_count,
        })
    }

    fn tally(&self, enrollments: &[Enrollment]) -> Result<CreditTally, EnrollmentError> {
        let mut tally = CreditTally::default();
        for enrollment in enrollments {
            let Some(grade) = enrollment.grade.filter(|g| g.is_passing()) else {
                continue;
            };
            match self.courses.credits(&enrollment.key.course_code)? {
                Some(ects) => tally.record(grade, ects),
                None => warn!(
                    enrollment = %enrollment.key,
                    "Passed course no longer in catalog, skipped in transcript totals"
                ),
            }
        }
        Ok(tally)
    }
}
