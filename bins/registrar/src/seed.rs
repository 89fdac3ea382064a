//! Seed file loading and replay.
//!
//! Enrollments in a seed file are events: the first entry for a key
//! registers it, and any entry carrying a grade or a change reason goes
//! through the grading engine. Seeded data therefore obeys every rule a
//! live caller would face.

use std::path::{Path, PathBuf};

use registrar_core::enrollment::{
    Course, EnrollmentError, EnrollmentKey, EnrollmentService, Student,
};
use registrar_db::InMemoryRegistry;
use registrar_shared::AppError;
use registrar_shared::types::StaffId;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Enrollment service over a single in-memory registry.
pub type RegistryService = EnrollmentService<InMemoryRegistry, InMemoryRegistry, InMemoryRegistry>;

/// Errors raised while loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The file could not be read.
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid seed JSON.
    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A student or course record was rejected.
    #[error("Seed record rejected: {0}")]
    Record(#[source] EnrollmentError),

    /// An enrollment entry broke an enrollment rule.
    #[error("Seed enrollment #{index} rejected: {source}")]
    Enrollment {
        /// Zero-based position in the `enrollments` array.
        index: usize,
        /// Rule that was broken.
        #[source]
        source: EnrollmentError,
    },
}

impl From<SeedError> for AppError {
    fn from(err: SeedError) -> Self {
        let message = err.to_string();
        match err {
            SeedError::Io { .. } => Self::Internal(message),
            SeedError::Parse(_) => Self::Validation(message),
            SeedError::Record(source) | SeedError::Enrollment { source, .. } => {
                Self::from(source).with_message(message)
            }
        }
    }
}

/// One enrollment event in a seed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedEnrollment {
    /// Student index number.
    pub student_index: String,
    /// Course code.
    pub course_code: String,
    /// Academic year in `YYYY/YYYY` form.
    pub academic_year: String,
    /// Staff member credited with the entry.
    pub added_by: String,
    /// Grade to enter, if any.
    #[serde(default)]
    pub grade: Option<i32>,
    /// Reason, making the entry a correction of an earlier grade.
    #[serde(default)]
    pub change_reason: Option<String>,
}

/// Parsed seed file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedFile {
    /// Students to load.
    #[serde(default)]
    pub students: Vec<Student>,
    /// Courses to load.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Enrollment events to replay in order.
    #[serde(default)]
    pub enrollments: Vec<SeedEnrollment>,
}

/// Counts of what a seed file loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Students inserted.
    pub students: usize,
    /// Courses inserted.
    pub courses: usize,
    /// Enrollments registered.
    pub registered: usize,
    /// Grade entries and corrections applied.
    pub graded: usize,
}

impl SeedFile {
    /// Reads and parses a seed file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Parse` if it is not
    /// valid seed JSON.
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parses seed JSON.
    ///
    /// # Errors
    ///
    /// Returns `Parse` if the input is not valid seed JSON.
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Loads students and courses, then replays enrollments through the
    /// service.
    ///
    /// # Errors
    ///
    /// Returns `Record` for an invalid student or course and `Enrollment`
    /// for the first enrollment event that breaks a rule.
    pub fn apply(
        self,
        registry: &InMemoryRegistry,
        service: &RegistryService,
    ) -> Result<SeedSummary, SeedError> {
        let mut summary = SeedSummary::default();

        for student in self.students {
            registry.insert_student(student).map_err(SeedError::Record)?;
            summary.students += 1;
        }
        for course in self.courses {
            registry.insert_course(course).map_err(SeedError::Record)?;
            summary.courses += 1;
        }

        for (index, entry) in self.enrollments.into_iter().enumerate() {
            let (registered, graded) = replay(service, &entry)
                .map_err(|source| SeedError::Enrollment { index, source })?;
            summary.registered += usize::from(registered);
            summary.graded += usize::from(graded);
        }

        Ok(summary)
    }
}

fn replay(service: &RegistryService, entry: &SeedEnrollment) -> Result<(bool, bool), EnrollmentError> {
    let key = EnrollmentKey::parse(&entry.student_index, &entry.course_code, &entry.academic_year)?;
    let staff = StaffId::new(entry.added_by.trim());

    let registered = if service.get_enrollment(&key)?.is_none() {
        service.register_enrollment(key.clone(), &staff)?;
        true
    } else {
        false
    };

    let graded = entry.grade.is_some() || entry.change_reason.is_some();
    if graded {
        service.enter_or_update_grade(&key, entry.grade, entry.change_reason.as_deref(), &staff)?;
    }

    debug!(enrollment = %key, registered, graded, "Seed entry replayed");
    Ok((registered, graded))
}
