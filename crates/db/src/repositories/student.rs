//! Student directory over the in-memory registry.

use registrar_core::enrollment::{
    EnrollmentError, StoreError, Student, StudentDirectory, validate_student,
};
use registrar_shared::types::StudentIndex;
use tracing::{debug, info};

use super::registry::InMemoryRegistry;

impl InMemoryRegistry {
    /// Inserts or replaces a student.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` if the student fails validation.
    pub fn insert_student(&self, student: Student) -> Result<(), EnrollmentError> {
        validate_student(&student)?;
        debug!(student = %student.index_number, "Student stored");
        self.students
            .write()
            .insert(student.index_number.clone(), student);
        Ok(())
    }

    /// Removes a student and every enrollment that references it.
    ///
    /// Returns the number of enrollments removed with the student, or `None`
    /// if the student did not exist.
    pub fn remove_student(&self, index: &StudentIndex) -> Option<usize> {
        let mut students = self.students.write();
        let mut enrollments = self.enrollments.write();

        students.remove(index)?;
        let before = enrollments.len();
        enrollments.retain(|key, _| &key.student_index != index);
        let removed = before - enrollments.len();

        info!(student = %index, enrollments = removed, "Student removed");
        Some(removed)
    }

    /// All students ordered by index number.
    #[must_use]
    pub fn list_students(&self) -> Vec<Student> {
        self.students.read().values().cloned().collect()
    }
}

impl StudentDirectory for InMemoryRegistry {
    fn get(&self, index: &StudentIndex) -> Result<Option<Student>, StoreError> {
        Ok(self.students.read().get(index).cloned())
    }

    fn exists(&self, index: &StudentIndex) -> Result<bool, StoreError> {
        Ok(self.students.read().contains_key(index))
    }
}
