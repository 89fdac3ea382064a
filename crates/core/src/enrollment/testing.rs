//! In-memory fakes and fixtures for enrollment tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use registrar_shared::types::{AcademicYear, CourseCode, StudentIndex};

use super::deletion::EnrollmentDeletionGuard;
use super::grading::GradingEngine;
use super::lifecycle::EnrollmentLifecycleManager;
use super::service::EnrollmentService;
use super::store::{CourseCatalog, EnrollmentStore, StoreError, StudentDirectory};
use super::transcript::TranscriptAggregator;
use super::types::{Course, Enrollment, EnrollmentKey, Grade, Student};

pub fn year(start: u16) -> AcademicYear {
    AcademicYear::starting(start)
}

pub fn key(student: &str, course: &str, start: u16) -> EnrollmentKey {
    EnrollmentKey::new(student, course, year(start))
}

pub fn ungraded(key: EnrollmentKey) -> Enrollment {
    Enrollment::new(key, "REF1".into())
}

pub fn graded(key: EnrollmentKey, grade: i32) -> Enrollment {
    let mut enrollment = ungraded(key);
    enrollment.grade = Some(Grade::new(grade).unwrap());
    enrollment.grade_date = NaiveDate::from_ymd_opt(2024, 1, 15);
    enrollment
}

pub fn student(index: &str) -> Student {
    Student {
        index_number: index.into(),
        first_name: "Ana".to_string(),
        last_name: "Petrovic".to_string(),
        study_program: "Computer Science".to_string(),
        enrollment_year: 2022,
    }
}

pub fn course(code: &str, ects: u32) -> Course {
    Course {
        course_code: code.into(),
        name: format!("Course {code}"),
        ects,
        semester: 1,
    }
}

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<EnrollmentKey, Enrollment>>,
}

impl MemoryStore {
    pub fn insert(&self, enrollment: Enrollment) {
        self.records
            .lock()
            .unwrap()
            .insert(enrollment.key.clone(), enrollment);
    }

    pub fn get(&self, key: &EnrollmentKey) -> Option<Enrollment> {
        self.records.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl EnrollmentStore for MemoryStore {
    fn create(&self, enrollment: Enrollment) -> Result<Enrollment, StoreError> {
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&enrollment.key) {
            return Err(StoreError::DuplicateKey(enrollment.key.to_string()));
        }
        records.insert(enrollment.key.clone(), enrollment.clone());
        Ok(enrollment)
    }

    fn find_by_key(&self, key: &EnrollmentKey) -> Result<Option<Enrollment>, StoreError> {
        Ok(self.get(key))
    }

    fn update(&self, enrollment: &Enrollment) -> Result<bool, StoreError> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&enrollment.key) {
            Some(slot) => {
                *slot = enrollment.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, key: &EnrollmentKey) -> Result<bool, StoreError> {
        Ok(self.records.lock().unwrap().remove(key).is_some())
    }

    fn find_all(&self) -> Result<Vec<Enrollment>, StoreError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
}

#[derive(Default)]
pub struct MemoryDirectory {
    students: Mutex<BTreeMap<StudentIndex, Student>>,
}

impl MemoryDirectory {
    pub fn add(&self, student: Student) {
        self.students
            .lock()
            .unwrap()
            .insert(student.index_number.clone(), student);
    }
}

impl StudentDirectory for MemoryDirectory {
    fn get(&self, index: &StudentIndex) -> Result<Option<Student>, StoreError> {
        Ok(self.students.lock().unwrap().get(index).cloned())
    }
}

#[derive(Default)]
pub struct MemoryCatalog {
    courses: Mutex<BTreeMap<CourseCode, Course>>,
}

impl MemoryCatalog {
    pub fn add(&self, course: Course) {
        self.courses
            .lock()
            .unwrap()
            .insert(course.course_code.clone(), course);
    }

    pub fn remove(&self, code: &str) {
        self.courses.lock().unwrap().remove(&CourseCode::from(code));
    }
}

impl CourseCatalog for MemoryCatalog {
    fn get(&self, code: &CourseCode) -> Result<Option<Course>, StoreError> {
        Ok(self.courses.lock().unwrap().get(code).cloned())
    }
}

/// Students 123/22 and 456/22; courses CS101 (5), MA201 (6), PH301 (7).
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub students: Arc<MemoryDirectory>,
    pub courses: Arc<MemoryCatalog>,
}

impl Fixture {
    pub fn new() -> Self {
        let students = MemoryDirectory::default();
        students.add(student("123/22"));
        students.add(student("456/22"));

        let courses = MemoryCatalog::default();
        courses.add(course("CS101", 5));
        courses.add(course("MA201", 6));
        courses.add(course("PH301", 7));

        Self {
            store: Arc::new(MemoryStore::default()),
            students: Arc::new(students),
            courses: Arc::new(courses),
        }
    }

    pub fn lifecycle(&self) -> EnrollmentLifecycleManager<MemoryStore, MemoryDirectory, MemoryCatalog> {
        EnrollmentLifecycleManager::new(
            self.store.clone(),
            self.students.clone(),
            self.courses.clone(),
        )
    }

    pub fn grading(&self) -> GradingEngine<MemoryStore> {
        GradingEngine::new(self.store.clone())
    }

    pub fn deletion(&self) -> EnrollmentDeletionGuard<MemoryStore> {
        EnrollmentDeletionGuard::new(self.store.clone())
    }

    pub fn transcript(&self) -> TranscriptAggregator<MemoryStore, MemoryDirectory, MemoryCatalog> {
        TranscriptAggregator::new(
            self.store.clone(),
            self.students.clone(),
            self.courses.clone(),
        )
    }

    pub fn service(&self) -> EnrollmentService<MemoryStore, MemoryDirectory, MemoryCatalog> {
        EnrollmentService::new(
            self.store.clone(),
            self.students.clone(),
            self.courses.clone(),
        )
    }
}

enum Failure {
    DuplicateOnCreate,
    Backend,
    Vanishing(Enrollment),
}

/// A store that misbehaves in one specific way.
pub struct FailingStore {
    failure: Failure,
}

impl FailingStore {
    /// Reports no history, then rejects every create as a duplicate.
    pub fn duplicate_on_create() -> Self {
        Self {
            failure: Failure::DuplicateOnCreate,
        }
    }

    /// Every call fails with a backend error.
    pub fn backend() -> Self {
        Self {
            failure: Failure::Backend,
        }
    }

    /// Lookups return `record`, but writes find nothing to touch.
    pub fn vanishing(record: Enrollment) -> Self {
        Self {
            failure: Failure::Vanishing(record),
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.failure {
            Failure::Backend => Err(StoreError::backend("connection reset")),
            _ => Ok(()),
        }
    }
}

impl EnrollmentStore for FailingStore {
    fn create(&self, enrollment: Enrollment) -> Result<Enrollment, StoreError> {
        self.check()?;
        match &self.failure {
            Failure::DuplicateOnCreate => Err(StoreError::DuplicateKey(enrollment.key.to_string())),
            _ => Ok(enrollment),
        }
    }

    fn find_by_key(&self, key: &EnrollmentKey) -> Result<Option<Enrollment>, StoreError> {
        self.check()?;
        match &self.failure {
            Failure::Vanishing(record) if &record.key == key => Ok(Some(record.clone())),
            _ => Ok(None),
        }
    }

    fn update(&self, _enrollment: &Enrollment) -> Result<bool, StoreError> {
        self.check()?;
        Ok(false)
    }

    fn delete(&self, _key: &EnrollmentKey) -> Result<bool, StoreError> {
        self.check()?;
        Ok(false)
    }

    fn find_all(&self) -> Result<Vec<Enrollment>, StoreError> {
        self.check()?;
        match &self.failure {
            Failure::Vanishing(record) => Ok(vec![record.clone()]),
            _ => Ok(Vec::new()),
        }
    }
}
