// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use debtbook::engine::{
    current_fiscal_year, fiscal_range_report, fiscal_ranges, fiscal_year_bounds,
    four_year_history, four_year_rollup, penalty_for_year, sum_payments_in_range, year_summary,
};
use debtbook::error::LedgerError;
use debtbook::models::Payment;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn scenario_payments() -> Vec<Payment> {
    vec![
        Payment::new("Somchai", d(2025, 6, 1), dec!(500)),
        Payment::new("Somchai", d(2025, 12, 15), dec!(300)).with_note("cash"),
        Payment::new("Somchai", d(2025, 3, 1), dec!(1000)),
    ]
}

#[test]
fn bounds_run_april_5_to_march_5() {
    let (start, end) = fiscal_year_bounds(2025).unwrap();
    assert_eq!(start, d(2025, 4, 5));
    assert_eq!(end, d(2026, 3, 5));
}

#[test]
fn current_fiscal_year_switches_in_april() {
    assert_eq!(current_fiscal_year(d(2025, 4, 1)), 2025);
    assert_eq!(current_fiscal_year(d(2025, 12, 31)), 2025);
    assert_eq!(current_fiscal_year(d(2026, 1, 1)), 2025);
    assert_eq!(current_fiscal_year(d(2026, 3, 31)), 2025);
    assert_eq!(current_fiscal_year(d(2026, 4, 1)), 2026);
}

#[test]
fn empty_history_sums_to_zero() {
    let total = sum_payments_in_range(&[], "Somchai", d(2025, 4, 5), d(2026, 3, 5)).unwrap();
    assert_eq!(total, Decimal::ZERO);
}

#[test]
fn range_bounds_are_inclusive() {
    let payments = vec![
        Payment::new("A", d(2025, 4, 5), dec!(10)),
        Payment::new("A", d(2026, 3, 5), dec!(20)),
        Payment::new("A", d(2025, 4, 4), dec!(40)),
        Payment::new("A", d(2026, 3, 6), dec!(80)),
    ];
    let total = sum_payments_in_range(&payments, "A", d(2025, 4, 5), d(2026, 3, 5)).unwrap();
    assert_eq!(total, dec!(30));
}

#[test]
fn name_match_is_exact_and_case_sensitive() {
    let payments = vec![
        Payment::new("Somchai", d(2025, 5, 1), dec!(100)),
        Payment::new("somchai", d(2025, 5, 1), dec!(200)),
        Payment::new("Somchai ", d(2025, 5, 1), dec!(400)),
    ];
    let total = sum_payments_in_range(&payments, "Somchai", d(2025, 4, 5), d(2026, 3, 5)).unwrap();
    assert_eq!(total, dec!(100));
}

#[test]
fn duplicate_payments_are_all_counted() {
    let p = Payment::new("A", d(2025, 5, 1), dec!(100));
    let payments = vec![p.clone(), p];
    let total = sum_payments_in_range(&payments, "A", d(2025, 4, 5), d(2026, 3, 5)).unwrap();
    assert_eq!(total, dec!(200));
}

#[test]
fn inverted_range_is_rejected() {
    let err = sum_payments_in_range(&[], "A", d(2025, 5, 1), d(2025, 4, 1)).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));
}

#[test]
fn negative_debt_is_rejected() {
    let err = year_summary(dec!(-1), &[], "A", 2025).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));
    assert!(four_year_rollup(dec!(-0.01), &[], "A", 2025).is_err());
}

#[test]
fn quarter_split_sums_back_to_total_debt() {
    for total in [dec!(0), dec!(0.01), dec!(4000), dec!(1234567.89), dec!(1000.03)] {
        let sum: Decimal = (2022..2026)
            .map(|y| year_summary(total, &[], "A", y).unwrap().required_yearly)
            .sum();
        assert_eq!(sum, total, "split of {}", total);
    }
}

#[test]
fn year_summary_scenario() {
    let payments = scenario_payments();
    let s = year_summary(dec!(4000), &payments, "Somchai", 2025).unwrap();
    assert_eq!(s.label, "2025-2026");
    assert_eq!(s.required_yearly, dec!(1000));
    assert_eq!(s.paid, dec!(800));
    assert_eq!(s.balance, dec!(200));
}

#[test]
fn year_summary_is_idempotent() {
    let payments = scenario_payments();
    let a = year_summary(dec!(4000), &payments, "Somchai", 2025).unwrap();
    let b = year_summary(dec!(4000), &payments, "Somchai", 2025).unwrap();
    assert_eq!(a, b);
    assert_eq!(payments, scenario_payments());
}

#[test]
fn unknown_customer_owes_nothing_and_balance_is_minus_paid() {
    let payments = vec![Payment::new("Ghost", d(2025, 5, 1), dec!(50))];
    let s = year_summary(Decimal::ZERO, &payments, "Ghost", 2025).unwrap();
    assert_eq!(s.required_yearly, Decimal::ZERO);
    assert_eq!(s.balance, dec!(-50));
}

#[test]
fn penalty_applied_after_year_end() {
    let payments = scenario_payments();
    let s = year_summary(dec!(4000), &payments, "Somchai", 2025).unwrap();
    let (_, end) = fiscal_year_bounds(2025).unwrap();
    let penalty = penalty_for_year(s.balance, d(2026, 4, 1), end);
    assert_eq!(penalty, dec!(30.00));
    assert_eq!(format!("{:.2}", penalty), "30.00");
}

#[test]
fn penalty_withheld_before_year_end() {
    let (_, end) = fiscal_year_bounds(2025).unwrap();
    assert_eq!(penalty_for_year(dec!(200), d(2025, 12, 1), end), Decimal::ZERO);
}

#[test]
fn no_penalty_on_or_before_year_end_for_any_balance() {
    let (_, end) = fiscal_year_bounds(2025).unwrap();
    for balance in [dec!(-1000), dec!(0), dec!(0.01), dec!(999999)] {
        for today in [d(2025, 4, 5), d(2025, 10, 1), end] {
            assert_eq!(penalty_for_year(balance, today, end), Decimal::ZERO);
        }
    }
}

#[test]
fn penalty_is_never_negative() {
    let (_, end) = fiscal_year_bounds(2025).unwrap();
    for balance in [dec!(-500), dec!(-0.01), dec!(0), dec!(1), dec!(12345.67)] {
        for today in [d(2024, 1, 1), end, d(2026, 3, 6), d(2040, 1, 1)] {
            assert!(penalty_for_year(balance, today, end) >= Decimal::ZERO);
        }
    }
}

#[test]
fn overpayment_has_no_penalty() {
    let payments = vec![Payment::new("A", d(2025, 7, 1), dec!(1500))];
    let s = year_summary(dec!(4000), &payments, "A", 2025).unwrap();
    assert_eq!(s.balance, dec!(-500));
    let (_, end) = fiscal_year_bounds(2025).unwrap();
    assert_eq!(penalty_for_year(s.balance, d(2027, 1, 1), end), Decimal::ZERO);
}

#[test]
fn penalty_does_not_grow_with_lateness() {
    let (_, end) = fiscal_year_bounds(2025).unwrap();
    let day_after = penalty_for_year(dec!(200), d(2026, 3, 6), end);
    let years_later = penalty_for_year(dec!(200), d(2030, 3, 6), end);
    assert_eq!(day_after, dec!(30));
    assert_eq!(day_after, years_later);
}

fn four_paid_years() -> Vec<Payment> {
    (2022..=2025)
        .map(|y| Payment::new("A", d(y, 5, 1), dec!(1000)))
        .collect()
}

#[test]
fn rollup_of_fully_paid_horizon_is_zero() {
    let r = four_year_rollup(dec!(4000), &four_paid_years(), "A", 2025).unwrap();
    assert_eq!(r.window_start, d(2022, 4, 5));
    assert_eq!(r.window_end, d(2026, 3, 5));
    assert_eq!(r.paid, dec!(4000));
    assert_eq!(r.total_remaining, Decimal::ZERO);
}

#[test]
fn rollup_can_go_negative() {
    let mut payments = four_paid_years();
    payments.push(Payment::new("A", d(2025, 9, 1), dec!(250)));
    let r = four_year_rollup(dec!(4000), &payments, "A", 2025).unwrap();
    assert_eq!(r.total_remaining, dec!(-250));
}

#[test]
fn rollup_ignores_payments_outside_window() {
    let payments = vec![
        Payment::new("A", d(2022, 4, 4), dec!(1000)),
        Payment::new("A", d(2026, 3, 6), dec!(1000)),
        Payment::new("A", d(2023, 1, 1), dec!(100)),
    ];
    let r = four_year_rollup(dec!(4000), &payments, "A", 2025).unwrap();
    assert_eq!(r.total_remaining, dec!(3900));
}

#[test]
fn history_is_most_recent_first() {
    let rows: Vec<_> = four_year_history(dec!(4000), &four_paid_years(), "A", 2025)
        .collect::<Result<_, _>>()
        .unwrap();
    let years: Vec<i32> = rows.iter().map(|r| r.fiscal_year).collect();
    assert_eq!(years, vec![2025, 2024, 2023, 2022]);
    assert!(rows.iter().all(|r| r.balance == Decimal::ZERO));
}

#[test]
fn history_is_restartable_and_matches_year_summary() {
    let payments = scenario_payments();
    let first: Vec<_> = four_year_history(dec!(4000), &payments, "Somchai", 2025)
        .collect::<Result<_, _>>()
        .unwrap();
    let second: Vec<_> = four_year_history(dec!(4000), &payments, "Somchai", 2025)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0], year_summary(dec!(4000), &payments, "Somchai", 2025).unwrap());
    // the March 2025 payment belongs to fiscal 2024
    assert_eq!(first[1].paid, dec!(1000));
    assert_eq!(first[1].balance, Decimal::ZERO);
}

#[test]
fn payments_between_march_6_and_april_4_fall_in_no_year() {
    let payments = vec![Payment::new("A", d(2026, 3, 20), dec!(100))];
    assert_eq!(year_summary(dec!(4000), &payments, "A", 2025).unwrap().paid, Decimal::ZERO);
    assert_eq!(year_summary(dec!(4000), &payments, "A", 2026).unwrap().paid, Decimal::ZERO);
}

#[test]
fn fiscal_ranges_are_generated_for_any_year() {
    let ranges = fiscal_ranges(2031, 3).unwrap();
    let labels: Vec<&str> = ranges.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["2031-2032", "2032-2033", "2033-2034"]);
    assert_eq!(ranges[2].start, d(2033, 4, 5));
    assert_eq!(ranges[2].end, d(2034, 3, 5));
    assert!(fiscal_ranges(2025, 0).unwrap().is_empty());
}

#[test]
fn range_report_open_and_closed() {
    let payments = scenario_payments();
    let open = fiscal_range_report(dec!(4000), &payments, "Somchai", 2025, d(2026, 3, 5)).unwrap();
    assert!(!open.closed);
    assert_eq!(open.shortage, dec!(200));
    assert_eq!(open.penalty, Decimal::ZERO);

    let closed = fiscal_range_report(dec!(4000), &payments, "Somchai", 2025, d(2026, 3, 6)).unwrap();
    assert!(closed.closed);
    assert_eq!(closed.required_yearly, dec!(1000));
    assert_eq!(closed.paid, dec!(800));
    assert_eq!(closed.penalty, dec!(30));
}

#[test]
fn range_report_clamps_shortage_on_overpayment() {
    let payments = vec![Payment::new("A", d(2025, 7, 1), dec!(1500))];
    let r = fiscal_range_report(dec!(4000), &payments, "A", 2025, d(2027, 1, 1)).unwrap();
    assert_eq!(r.shortage, Decimal::ZERO);
    assert_eq!(r.penalty, Decimal::ZERO);
}

#[test]
fn rollup_counts_gap_days_that_history_skips() {
    let payments = vec![Payment::new("A", d(2024, 3, 20), dec!(100))];
    let rollup = four_year_rollup(dec!(4000), &payments, "A", 2025).unwrap();
    let history_paid: Decimal = four_year_history(dec!(4000), &payments, "A", 2025)
        .map(|s| s.unwrap().paid)
        .sum();
    assert_eq!(rollup.paid, dec!(100));
    assert_eq!(history_paid, Decimal::ZERO);
}
