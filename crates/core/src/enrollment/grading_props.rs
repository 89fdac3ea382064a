//! Property-based tests for the grading state machine.

use proptest::prelude::*;

use crate::enrollment::error::EnrollmentError;
use crate::enrollment::grading::GradeTransition;
use crate::enrollment::testing::{Fixture, graded, key, ungraded};
use crate::enrollment::types::{Grade, MAX_GRADE, MIN_GRADE};

/// Strategy for valid grades.
fn arb_grade() -> impl Strategy<Value = Grade> {
    (5i32..=10).prop_map(|g| Grade::new(g).unwrap())
}

/// Strategy for reasons with at least one visible character.
fn arb_reason() -> impl Strategy<Value = String> {
    "[ ]{0,3}[a-zA-Z0-9][a-zA-Z0-9 ]{0,40}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Exactly 5..=10 are accepted.
    #[test]
    fn prop_grade_range_is_exact(value in -50i32..50) {
        let in_range = (i32::from(MIN_GRADE)..=i32::from(MAX_GRADE)).contains(&value);
        prop_assert_eq!(Grade::new(value).is_ok(), in_range);
    }

    /// A first entry never needs a reason.
    #[test]
    fn prop_first_entry_needs_no_reason(
        grade in arb_grade(),
        reason in prop::option::of(".*"),
    ) {
        let plan = GradeTransition::plan(None, Some(grade), reason.as_deref());
        prop_assert_eq!(plan.unwrap(), GradeTransition::FirstEntry { grade });
    }

    /// Every correction needs a non-blank reason, whatever the grades.
    #[test]
    fn prop_correction_needs_reason(
        current in arb_grade(),
        next in prop::option::of(arb_grade()),
        blank in "[ \t]{0,5}",
    ) {
        prop_assert!(matches!(
            GradeTransition::plan(Some(current), next, None),
            Err(EnrollmentError::ChangeReasonRequired)
        ));
        prop_assert!(matches!(
            GradeTransition::plan(Some(current), next, Some(blank.as_str())),
            Err(EnrollmentError::ChangeReasonRequired)
        ));
    }

    /// With a reason, a correction stores it trimmed and keeps the first entry date.
    #[test]
    fn prop_correction_records_reason(
        current in 5i32..=10,
        next in prop::option::of(5i32..=10),
        reason in arb_reason(),
    ) {
        let fx = Fixture::new();
        let k = key("123/22", "CS101", 2023);
        let original = graded(k.clone(), current);
        fx.store.insert(original.clone());

        let updated = fx
            .grading()
            .enter_or_update_grade(&k, next, Some(reason.as_str()), &"REF9".into())
            .unwrap();

        prop_assert_eq!(updated.grade.map(|g| i32::from(g.value())), next);
        prop_assert_eq!(updated.change_reason.as_deref(), Some(reason.trim()));
        prop_assert!(updated.change_date.is_some());
        prop_assert_eq!(updated.grade_date, original.grade_date);
        prop_assert_eq!(updated.added_by, original.added_by);
    }

    /// An invalid grade never mutates the stored record.
    #[test]
    fn prop_rejected_grade_leaves_record(value in prop_oneof![-20i32..5, 11i32..40]) {
        let fx = Fixture::new();
        let k = key("123/22", "CS101", 2023);
        fx.store.insert(ungraded(k.clone()));

        let result = fx.grading().enter_or_update_grade(&k, Some(value), None, &"REF1".into());
        prop_assert!(matches!(result, Err(EnrollmentError::GradeOutOfRange(_))));
        prop_assert_eq!(fx.store.get(&k), Some(ungraded(k)));
    }
}
