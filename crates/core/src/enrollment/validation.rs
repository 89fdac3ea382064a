//! Field-level validation shared by the enrollment components.

use registrar_shared::types::StaffId;

use super::error::EnrollmentError;
use super::types::{Course, Student};

/// Accepted credit-point range of a course.
pub const ECTS_RANGE: std::ops::RangeInclusive<u32> = 1..=15;

/// Accepted semester range of a course.
pub const SEMESTER_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// Reject a blank acting staff identifier.
///
/// # Errors
///
/// Returns `EnrollmentError::MissingField("acting_staff")` if blank.
pub fn require_staff(staff: &StaffId) -> Result<(), EnrollmentError> {
    if staff.is_blank() {
        return Err(EnrollmentError::MissingField("acting_staff"));
    }
    Ok(())
}

/// Returns the trimmed reason if it carries any text.
#[must_use]
pub fn non_blank(reason: Option<&str>) -> Option<&str> {
    reason.map(str::trim).filter(|r| !r.is_empty())
}

/// Validate a course record before it enters the catalog.
///
/// # Errors
///
/// Returns `EnrollmentError::InvalidRecord` for a blank code or name, or
/// credits/semester outside their ranges.
pub fn validate_course(course: &Course) -> Result<(), EnrollmentError> {
    if course.course_code.is_blank() {
        return Err(EnrollmentError::invalid_record("course", "code is required"));
    }
    if course.name.trim().is_empty() {
        return Err(EnrollmentError::invalid_record("course", "name is required"));
    }
    if !ECTS_RANGE.contains(&course.ects) {
        return Err(EnrollmentError::invalid_record(
            "course",
            format!("ECTS must be between 1 and 15, got {}", course.ects),
        ));
    }
    if !SEMESTER_RANGE.contains(&course.semester) {
        return Err(EnrollmentError::invalid_record(
            "course",
            format!("semester must be between 1 and 10, got {}", course.semester),
        ));
    }
    Ok(())
}

/// Validate a student record before it enters the directory.
///
/// # Errors
///
/// Returns `EnrollmentError::InvalidRecord` for a blank index or name.
pub fn validate_student(student: &Student) -> Result<(), EnrollmentError> {
    if student.index_number.is_blank() {
        return Err(EnrollmentError::invalid_record(
            "student",
            "index number is required",
        ));
    }
    if student.first_name.trim().is_empty() || student.last_name.trim().is_empty() {
        return Err(EnrollmentError::invalid_record(
            "student",
            "first and last name are required",
        ));
    }
    Ok(())
}
