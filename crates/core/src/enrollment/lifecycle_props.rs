//! Property-based tests for enrollment registration.

use proptest::prelude::*;

use crate::enrollment::error::EnrollmentError;
use crate::enrollment::lifecycle::check_history;
use crate::enrollment::store::EnrollmentStore;
use crate::enrollment::testing::{Fixture, graded, key, ungraded};
use crate::enrollment::types::{Enrollment, EnrollmentKey};

const STUDENTS: [&str; 2] = ["123/22", "456/22"];
const COURSES: [&str; 3] = ["CS101", "MA201", "PH301"];

/// Strategy for one prior enrollment of student 123/22 in CS101.
fn arb_prior() -> impl Strategy<Value = Enrollment> {
    (2018u16..2026, prop::option::of(5i32..=10)).prop_map(|(start, grade)| {
        let k = key("123/22", "CS101", start);
        match grade {
            Some(g) => graded(k, g),
            None => ungraded(k),
        }
    })
}

/// A registration attempt: student, course, year.
fn arb_attempt() -> impl Strategy<Value = (usize, usize, u16)> {
    (0..STUDENTS.len(), 0..COURSES.len(), 2020u16..2023)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A passed record in any year always wins over every other outcome.
    #[test]
    fn prop_passed_history_always_blocks(
        history in prop::collection::vec(arb_prior(), 0..6),
        start in 2018u16..2026,
    ) {
        let result = check_history(&key("123/22", "CS101", start), &history);
        let any_passed = history.iter().any(Enrollment::is_passed);
        let same_year = history.iter().any(|e| e.key.academic_year.start() == start);

        match result {
            Err(EnrollmentError::AlreadyPassed { .. }) => prop_assert!(any_passed),
            Err(EnrollmentError::DuplicateEnrollment(_)) => {
                prop_assert!(!any_passed);
                prop_assert!(same_year);
            }
            Ok(()) => prop_assert!(!any_passed && !same_year),
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// Interleaved registrations, first grades and corrections against any
    /// earlier key never break uniqueness or the single-pass rule.
    #[test]
    fn prop_store_invariants_hold(ops in prop::collection::vec(arb_op(), 1..40)) {
        let fx = Fixture::new();
        let service = fx.service();
        let staff = registrar_shared::types::StaffId::from("REF1");
        let mut registered: Vec<EnrollmentKey> = Vec::new();

        for op in ops {
            match op {
                Op::Register(s, c, start) => {
                    let k = key(STUDENTS[s], COURSES[c], start);
                    if service.register_enrollment(k.clone(), &staff).is_ok() {
                        registered.push(k);
                    }
                }
                Op::Grade { target, grade, reason } => {
                    if registered.is_empty() {
                        continue;
                    }
                    let k = &registered[target % registered.len()];
                    let _ = service.enter_or_update_grade(k, grade, reason.then_some("re-marked"), &staff);
                }
            }
            assert_single_pass(&fx)?;
        }

        let page = service
            .list_enrollments(&registrar_shared::types::PageRequest { page: 1, per_page: 1000 })
            .unwrap();
        prop_assert_eq!(page.meta.total as usize, fx.store.len());
        prop_assert_eq!(registered.len(), fx.store.len());
    }
}

/// One step against the enrollment service.
#[derive(Debug, Clone)]
enum Op {
    Register(usize, usize, u16),
    Grade {
        target: usize,
        grade: Option<i32>,
        reason: bool,
    },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_attempt().prop_map(|(s, c, start)| Op::Register(s, c, start)),
        (any::<usize>(), prop::option::of(5i32..=10), any::<bool>())
            .prop_map(|(target, grade, reason)| Op::Grade { target, grade, reason }),
    ]
}

fn assert_single_pass(fx: &Fixture) -> Result<(), TestCaseError> {
    let all = fx.store.find_all().unwrap();
    for student in STUDENTS {
        for course in COURSES {
            let passes = all
                .iter()
                .filter(|e| {
                    e.key.student_index.as_str() == student
                        && e.key.course_code.as_str() == course
                        && e.is_passed()
                })
                .count();
            prop_assert!(passes <= 1, "{student} passed {course} {passes} times");
        }
    }
    Ok(())
}
