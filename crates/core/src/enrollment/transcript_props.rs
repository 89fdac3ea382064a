//! Property-based tests for transcript aggregation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::enrollment::testing::{Fixture, graded, key, ungraded};
use crate::enrollment::types::NO_PASSED_AVERAGE;

const COURSES: [(&str, u32); 3] = [("CS101", 5), ("MA201", 6), ("PH301", 7)];

/// Per course and year: absent, ungraded, or graded.
fn arb_cell() -> impl Strategy<Value = Option<Option<i32>>> {
    prop::option::of(prop::option::of(5i32..=10))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Credits and average are computed from passing grades only.
    #[test]
    fn prop_aggregates_match_passing_grades(
        cells in prop::collection::vec(arb_cell(), COURSES.len() * 2),
    ) {
        let fx = Fixture::new();
        let mut expected_credits = 0u32;
        let mut passing = Vec::new();

        for (i, cell) in cells.iter().enumerate() {
            let (code, ects) = COURSES[i % COURSES.len()];
            let start = 2022 + u16::try_from(i / COURSES.len()).unwrap();
            let k = key("123/22", code, start);
            match cell {
                None => {}
                Some(None) => fx.store.insert(ungraded(k)),
                Some(Some(g)) => {
                    fx.store.insert(graded(k, *g));
                    if *g >= 6 {
                        expected_credits += ects;
                        passing.push(*g);
                    }
                }
            }
        }

        let report = fx.transcript().generate_report(&"123/22".into()).unwrap();
        prop_assert_eq!(report.enrollments.len(), fx.store.len());
        prop_assert_eq!(report.total_credits, expected_credits);
        prop_assert_eq!(report.passed_count, passing.len());

        if passing.is_empty() {
            prop_assert_eq!(report.average_grade, NO_PASSED_AVERAGE);
        } else {
            let sum: i32 = passing.iter().sum();
            let expected = Decimal::from(sum) / Decimal::from(passing.len());
            prop_assert_eq!(report.average_grade, expected);
            prop_assert!(report.average_grade >= Decimal::from(6));
            prop_assert!(report.average_grade <= Decimal::from(10));
        }
    }
}
