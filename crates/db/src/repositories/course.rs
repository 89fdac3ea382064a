//! Course catalog over the in-memory registry.

use registrar_core::enrollment::{
    Course, CourseCatalog, EnrollmentError, StoreError, validate_course,
};
use registrar_shared::types::CourseCode;
use tracing::{debug, info};

use super::registry::InMemoryRegistry;

impl InMemoryRegistry {
    /// Inserts or replaces a course.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` if the course fails validation.
    pub fn insert_course(&self, course: Course) -> Result<(), EnrollmentError> {
        validate_course(&course)?;
        debug!(course = %course.course_code, ects = course.ects, "Course stored");
        self.courses.write().insert(course.course_code.clone(), course);
        Ok(())
    }

    /// Removes a course and every enrollment that references it.
    ///
    /// Returns the number of enrollments removed with the course, or `None`
    /// if the course did not exist.
    pub fn remove_course(&self, code: &CourseCode) -> Option<usize> {
        let mut courses = self.courses.write();
        let mut enrollments = self.enrollments.write();

        courses.remove(code)?;
        let before = enrollments.len();
        enrollments.retain(|key, _| &key.course_code != code);
        let removed = before - enrollments.len();

        info!(course = %code, enrollments = removed, "Course removed");
        Some(removed)
    }

    /// All courses ordered by code.
    #[must_use]
    pub fn list_courses(&self) -> Vec<Course> {
        self.courses.read().values().cloned().collect()
    }
}

impl CourseCatalog for InMemoryRegistry {
    fn get(&self, code: &CourseCode) -> Result<Option<Course>, StoreError> {
        Ok(self.courses.read().get(code).cloned())
    }

    fn exists(&self, code: &CourseCode) -> Result<bool, StoreError> {
        Ok(self.courses.read().contains_key(code))
    }
}
