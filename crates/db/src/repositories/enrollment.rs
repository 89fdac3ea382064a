//! Enrollment store over the in-memory registry.

use registrar_core::enrollment::{Enrollment, EnrollmentKey, EnrollmentStore, StoreError};
use registrar_shared::types::{AcademicYear, StudentIndex};
use tracing::debug;

use super::registry::InMemoryRegistry;

impl EnrollmentStore for InMemoryRegistry {
    fn create(&self, enrollment: Enrollment) -> Result<Enrollment, StoreError> {
        let students = self.students.read();
        let courses = self.courses.read();
        let mut enrollments = self.enrollments.write();

        if !students.contains_key(&enrollment.key.student_index) {
            return Err(StoreError::MissingReference(format!(
                "student {}",
                enrollment.key.student_index
            )));
        }
        if !courses.contains_key(&enrollment.key.course_code) {
            return Err(StoreError::MissingReference(format!(
                "course {}",
                enrollment.key.course_code
            )));
        }
        if enrollments.contains_key(&enrollment.key) {
            return Err(StoreError::DuplicateKey(enrollment.key.to_string()));
        }

        enrollments.insert(enrollment.key.clone(), enrollment.clone());
        debug!(enrollment = %enrollment.key, "Enrollment stored");
        Ok(enrollment)
    }

    fn find_by_key(&self, key: &EnrollmentKey) -> Result<Option<Enrollment>, StoreError> {
        Ok(self.enrollments.read().get(key).cloned())
    }

    fn update(&self, enrollment: &Enrollment) -> Result<bool, StoreError> {
        let mut enrollments = self.enrollments.write();
        let Some(slot) = enrollments.get_mut(&enrollment.key) else {
            return Ok(false);
        };
        *slot = enrollment.clone();
        Ok(true)
    }

    fn delete(&self, key: &EnrollmentKey) -> Result<bool, StoreError> {
        Ok(self.enrollments.write().remove(key).is_some())
    }

    fn find_all(&self) -> Result<Vec<Enrollment>, StoreError> {
        Ok(self.enrollments.read().values().cloned().collect())
    }

    fn find_by_student(&self, student: &StudentIndex) -> Result<Vec<Enrollment>, StoreError> {
        Ok(self
            .enrollments
            .read()
            .values()
            .filter(|e| &e.key.student_index == student)
            .cloned()
            .collect())
    }

    fn find_by_student_and_year(
        &self,
        student: &StudentIndex,
        year: AcademicYear,
    ) -> Result<Vec<Enrollment>, StoreError> {
        Ok(self
            .enrollments
            .read()
            .values()
            .filter(|e| &e.key.student_index == student && e.key.academic_year == year)
            .cloned()
            .collect())
    }
}
