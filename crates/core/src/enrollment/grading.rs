//! Grade entry and correction.
//!
//! An enrollment moves through two states:
//! - Ungraded → Graded (first entry, no reason needed, sets `grade_date`)
//! - Graded → Graded (correction, reason required, sets `change_date`)
//!
//! This is the only place that writes `grade`, `change_reason`,
//! `change_date` and `modified_by`.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use registrar_shared::types::StaffId;
use tracing::info;

use super::error::EnrollmentError;
use super::store::EnrollmentStore;
use super::types::{Enrollment, EnrollmentKey, Grade};
use super::validation::{non_blank, require_staff};

/// A validated grade change, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeTransition {
    /// First grade on an ungraded enrollment.
    FirstEntry {
        /// The grade being recorded.
        grade: Grade,
    },
    /// Change of an existing grade.
    Correction {
        /// The new grade, or `None` to withdraw it.
        grade: Option<Grade>,
        /// Why the grade changed.
        reason: String,
    },
}

impl GradeTransition {
    /// Decide which transition applies to an enrollment currently holding
    /// `current`.
    ///
    /// # Errors
    ///
    /// Returns `GradeRequired` when an ungraded enrollment gets no grade,
    /// and `ChangeReasonRequired` when a graded enrollment is changed
    /// without a non-blank reason.
    pub fn plan(
        current: Option<Grade>,
        new_grade: Option<Grade>,
        reason: Option<&str>,
    ) -> Result<Self, EnrollmentError> {
        match current {
            None => new_grade
                .map(|grade| Self::FirstEntry { grade })
                .ok_or(EnrollmentError::GradeRequired),
            Some(_) => {
                let reason = non_blank(reason).ok_or(EnrollmentError::ChangeReasonRequired)?;
                Ok(Self::Correction {
                    grade: new_grade,
                    reason: reason.to_string(),
                })
            }
        }
    }

    /// Write the transition onto the enrollment.
    pub fn apply(self, enrollment: &mut Enrollment, acting_staff: &StaffId, today: NaiveDate) {
        match self {
            Self::FirstEntry { grade } => {
                enrollment.grade = Some(grade);
                enrollment.grade_date = Some(today);
            }
            Self::Correction { grade, reason } => {
                enrollment.grade = grade;
                enrollment.change_reason = Some(reason);
                enrollment.change_date = Some(today);
            }
        }
        enrollment.modified_by = Some(acting_staff.clone());
    }

    /// Returns true for a correction.
    #[must_use]
    pub fn is_correction(&self) -> bool {
        matches!(self, Self::Correction { .. })
    }
}

/// Reject a passing grade when another academic year of the same course
/// already passes.
///
/// # Errors
///
/// Returns `AlreadyPassed`.
pub fn check_single_pass(key: &EnrollmentKey, history: &[Enrollment]) -> Result<(), EnrollmentError> {
    let passed_elsewhere = history.iter().any(|e| {
        e.key.student_index == key.student_index
            && e.key.course_code == key.course_code
            && e.key.academic_year != key.academic_year
            && e.is_passed()
    });
    if passed_elsewhere {
        return Err(EnrollmentError::AlreadyPassed {
            student_index: key.student_index.clone(),
            course_code: key.course_code.clone(),
        });
    }
    Ok(())
}

fn system_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Enters first grades and records corrections.
pub struct GradingEngine<S> {
    store: Arc<S>,
    today: fn() -> NaiveDate,
}

impl<S: EnrollmentStore> GradingEngine<S> {
    /// Create a grading engine dated by the system clock.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, system_today)
    }

    /// Create a grading engine with a custom date source.
    #[must_use]
    pub fn with_clock(store: Arc<S>, today: fn() -> NaiveDate) -> Self {
        Self { store, today }
    }

    /// Enter a first grade or correct an existing one.
    ///
    /// `reason` is ignored for a first entry and required for a correction.
    /// A `None` grade on a graded enrollment withdraws the grade.
    ///
    /// Two callers grading the same enrollment concurrently both succeed;
    /// the later write wins.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` for a blank acting staff id,
    /// `GradeOutOfRange` for a grade outside 5..=10,
    /// `EnrollmentNotFound` if the enrollment does not exist (or disappears
    /// before the write), `GradeRequired` / `ChangeReasonRequired` per the
    /// state rules, `AlreadyPassed` if a passing grade would give the student
    /// a second pass in the course, and `Store` if the store fails.
    pub fn enter_or_update_grade(
        &self,
        key: &EnrollmentKey,
        new_grade: Option<i32>,
        reason: Option<&str>,
        acting_staff: &StaffId,
    ) -> Result<Enrollment, EnrollmentError> {
        require_staff(acting_staff)?;
        let new_grade = new_grade.map(Grade::new).transpose()?;
        key.validate()?;

        let mut enrollment = self
            .store
            .find_by_key(key)?
            .ok_or_else(|| EnrollmentError::EnrollmentNotFound(key.clone()))?;

        let previous = enrollment.grade;
        let transition = GradeTransition::plan(previous, new_grade, reason)?;
        if new_grade.is_some_and(Grade::is_passing) {
            let history = self.store.find_by_student(&key.student_index)?;
            check_single_pass(key, &history)?;
        }
        let correction = transition.is_correction();
        transition.apply(&mut enrollment, acting_staff, (self.today)());

        if !self.store.update(&enrollment)? {
            return Err(EnrollmentError::EnrollmentNotFound(key.clone()));
        }

        info!(
            enrollment = %key,
            previous = ?previous.map(Grade::value),
            grade = ?enrollment.grade.map(Grade::value),
            correction,
            modified_by = %acting_staff,
            "Grade recorded"
        );

        Ok(enrollment)
    }
}
