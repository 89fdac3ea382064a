//! Enrollment domain types.

use std::fmt;

use chrono::NaiveDate;
use registrar_shared::types::{AcademicYear, CourseCode, StaffId, StudentIndex};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::EnrollmentError;

/// Lowest grade that can be recorded.
pub const MIN_GRADE: u8 = 5;

/// Highest grade that can be recorded.
pub const MAX_GRADE: u8 = 10;

/// Lowest grade that counts as passing the course.
pub const PASSING_GRADE: u8 = 6;

/// Average reported for a student with no passed courses.
pub const NO_PASSED_AVERAGE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// A recorded grade, always within `MIN_GRADE..=MAX_GRADE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Grade(u8);

impl Grade {
    /// Validates a raw grade value.
    ///
    /// # Errors
    ///
    /// Returns `EnrollmentError::GradeOutOfRange` if the value is outside
    /// `MIN_GRADE..=MAX_GRADE`.
    pub fn new(value: i32) -> Result<Self, EnrollmentError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (MIN_GRADE..=MAX_GRADE).contains(v))
            .map(Self)
            .ok_or(EnrollmentError::GradeOutOfRange(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns true if the grade passes the course.
    #[must_use]
    pub const fn is_passing(self) -> bool {
        self.0 >= PASSING_GRADE
    }
}

impl TryFrom<i32> for Grade {
    type Error = EnrollmentError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i32::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite identity of an enrollment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentKey {
    /// Student index number.
    pub student_index: StudentIndex,
    /// Course code.
    pub course_code: CourseCode,
    /// Academic year of the enrollment.
    pub academic_year: AcademicYear,
}

impl EnrollmentKey {
    /// Creates a key from already typed parts.
    #[must_use]
    pub fn new(
        student_index: impl Into<StudentIndex>,
        course_code: impl Into<CourseCode>,
        academic_year: AcademicYear,
    ) -> Self {
        Self {
            student_index: student_index.into(),
            course_code: course_code.into(),
            academic_year,
        }
    }

    /// Builds a key from raw strings, rejecting blank parts and malformed years.
    ///
    /// # Errors
    ///
    /// Returns `EnrollmentError::MissingField` for a blank student index or
    /// course code, and `EnrollmentError::InvalidAcademicYear` for a year
    /// that is empty or not in `YYYY/YYYY` form.
    pub fn parse(
        student_index: &str,
        course_code: &str,
        academic_year: &str,
    ) -> Result<Self, EnrollmentError> {
        let key = Self {
            student_index: StudentIndex::new(student_index.trim()),
            course_code: CourseCode::new(course_code.trim()),
            academic_year: academic_year.parse()?,
        };
        key.validate()?;
        Ok(key)
    }

    /// Checks that no identifier part is blank.
    ///
    /// # Errors
    ///
    /// Returns `EnrollmentError::MissingField` naming the first blank part.
    pub fn validate(&self) -> Result<(), EnrollmentError> {
        if self.student_index.is_blank() {
            return Err(EnrollmentError::MissingField("student_index"));
        }
        if self.course_code.is_blank() {
            return Err(EnrollmentError::MissingField("course_code"));
        }
        Ok(())
    }
}

impl fmt::Display for EnrollmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {}",
            self.student_index, self.course_code, self.academic_year
        )
    }
}

/// A record linking one student to one course in one academic year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Composite identity.
    #[serde(flatten)]
    pub key: EnrollmentKey,
    /// Current grade, absent until first entered.
    pub grade: Option<Grade>,
    /// Date of the first grade entry.
    pub grade_date: Option<NaiveDate>,
    /// Reason given for the latest correction.
    pub change_reason: Option<String>,
    /// Date of the latest correction.
    pub change_date: Option<NaiveDate>,
    /// Staff member who created the record.
    pub added_by: StaffId,
    /// Staff member who last touched the grade.
    pub modified_by: Option<StaffId>,
}

impl Enrollment {
    /// Creates an ungraded enrollment.
    #[must_use]
    pub fn new(key: EnrollmentKey, added_by: StaffId) -> Self {
        Self {
            key,
            grade: None,
            grade_date: None,
            change_reason: None,
            change_date: None,
            added_by,
            modified_by: None,
        }
    }

    /// Returns true if the enrollment carries a passing grade.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.grade.is_some_and(Grade::is_passing)
    }

    /// Returns true if a grade has been entered.
    #[must_use]
    pub fn is_graded(&self) -> bool {
        self.grade.is_some()
    }
}

/// Student read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Student index number.
    pub index_number: StudentIndex,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Study program.
    #[serde(default)]
    pub study_program: String,
    /// Calendar year the student first enrolled.
    #[serde(default)]
    pub enrollment_year: u16,
}

/// Course read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Course code.
    pub course_code: CourseCode,
    /// Course name.
    pub name: String,
    /// Credit points (ECTS).
    pub ects: u32,
    /// Semester in which the course is taught.
    pub semester: u32,
}

/// Derived transcript summary of a student's enrollment history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReport {
    /// The student.
    pub student: Student,
    /// Every enrollment of the student, ordered by year then course.
    pub enrollments: Vec<Enrollment>,
    /// Sum of credit points of passed courses.
    pub total_credits: u32,
    /// Mean of passing grades, or `NO_PASSED_AVERAGE` when none exist.
    pub average_grade: Decimal,
    /// Number of passing enrollments counted in the aggregates.
    pub passed_count: usize,
}
