//! Property tests for income tax and lifecycle classification.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use tuttle::calculation::{
    GERMANY, TaxCalculator, classify_lifecycle, classify_lifecycle_with, income_tax, is_active,
    is_upcoming,
};
use tuttle::error::TuttleError;
use tuttle::models::{LifecycleWindow, Status, StatusPriority};

/// Incomes in cents between 0 and 1,000,000.00.
fn income() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn day() -> impl Strategy<Value = NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0u64..3650).prop_map(move |offset| epoch + Days::new(offset))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: no tax is owed up to the basic allowance.
    #[test]
    fn property_no_tax_up_to_basic_allowance(cents in 0i64..=940_800) {
        let tax = income_tax(Decimal::new(cents, 2), GERMANY).unwrap();
        prop_assert_eq!(tax, Decimal::ZERO);
    }

    /// PROPERTY: a higher income never owes less tax.
    #[test]
    fn property_tax_is_monotonic(a in income(), b in income()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let calculator = TaxCalculator::default();
        let low_tax = calculator.calculate(low, GERMANY, 1).unwrap().unrounded;
        let high_tax = calculator.calculate(high, GERMANY, 1).unwrap().unrounded;
        prop_assert!(low_tax <= high_tax, "tax({}) = {} > tax({}) = {}", low, low_tax, high, high_tax);
    }

    /// PROPERTY: tax never exceeds the top marginal rate applied to the whole income.
    #[test]
    fn property_tax_below_top_rate(ti in income()) {
        let tax = income_tax(ti, GERMANY).unwrap();
        prop_assert!(tax >= Decimal::ZERO);
        prop_assert!(tax <= (ti * Decimal::new(45, 2)).ceil());
    }

    /// PROPERTY: the rounded tax is within half a unit of the exact tax.
    #[test]
    fn property_rounding_within_half_unit(ti in income()) {
        let result = TaxCalculator::default().calculate(ti, GERMANY, 1).unwrap();
        prop_assert!((result.income_tax - result.unrounded).abs() <= Decimal::new(5, 1));
    }

    /// PROPERTY: every country other than Germany is unsupported, for any income.
    #[test]
    fn property_other_countries_unsupported(ti in income(), country in "[A-Za-z ]{0,16}") {
        prop_assume!(country != GERMANY);
        let result = income_tax(ti, &country);
        prop_assert!(
            matches!(result, Err(TuttleError::UnsupportedCountry { .. })),
            "expected UnsupportedCountry, got {:?}",
            result
        );
    }

    /// PROPERTY: the classification agrees with the individual rule predicates.
    #[test]
    fn property_classification_matches_predicates(
        start in day(),
        length in 0u64..730,
        today in day(),
        completed in any::<bool>(),
    ) {
        let end = start + Days::new(length);
        let status = classify_lifecycle(start, end, completed, today);

        let expected = if is_active(end, today) {
            Status::Active
        } else if is_upcoming(start, today) {
            Status::Upcoming
        } else if completed {
            Status::Completed
        } else {
            Status::All
        };
        prop_assert_eq!(status, expected);
    }

    /// PROPERTY: for valid windows both rule orders agree except on windows not yet started.
    #[test]
    fn property_priorities_differ_only_before_start(
        start in day(),
        length in 0u64..730,
        today in day(),
        completed in any::<bool>(),
    ) {
        let window = LifecycleWindow::new(start, start + Days::new(length), completed).unwrap();
        let end_first = window.status(today, StatusPriority::EndDateFirst);
        let start_first = classify_lifecycle_with(
            start,
            window.end_date(),
            completed,
            today,
            StatusPriority::StartDateFirst,
        );

        if window.is_upcoming(today) {
            // A valid window that has not started also ends after today.
            prop_assert_eq!(end_first, Status::Active);
            prop_assert_eq!(start_first, Status::Upcoming);
        } else {
            prop_assert_eq!(end_first, start_first);
        }
    }
}
