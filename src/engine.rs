// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fiscal-year obligation and penalty rules.
//!
//! Every function here is pure: callers pass the customer's total debt, a
//! snapshot of the payment history and any reference dates explicitly.

use crate::error::{LedgerError, Result};
use crate::models::{FiscalRange, FiscalRangeReport, Payment, Rollup, YearSummary};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Number of fiscal years the total debt is spread across.
pub const YEARS_IN_HORIZON: i32 = 4;

/// Flat surcharge on a year-end shortfall (15%).
pub const PENALTY_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

const START_MONTH: u32 = 4;
const START_DAY: u32 = 5;
const END_MONTH: u32 = 3;
const END_DAY: u32 = 5;

pub fn fiscal_year_label(year: i32) -> String {
    format!("{}-{}", year, year + 1)
}

/// April 5 of `year` through March 5 of `year + 1`, both inclusive.
pub fn fiscal_year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, START_MONTH, START_DAY);
    let end = year
        .checked_add(1)
        .and_then(|next| NaiveDate::from_ymd_opt(next, END_MONTH, END_DAY));
    match (start, end) {
        (Some(s), Some(e)) => Ok((s, e)),
        _ => Err(LedgerError::InvalidInput(format!(
            "fiscal year {} is outside the supported date range",
            year
        ))),
    }
}

pub fn current_fiscal_year(reference_date: NaiveDate) -> i32 {
    if reference_date.month() >= START_MONTH {
        reference_date.year()
    } else {
        reference_date.year() - 1
    }
}

pub fn sum_payments_in_range(
    payments: &[Payment],
    customer_name: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Decimal> {
    if end < start {
        return Err(LedgerError::InvalidInput(format!(
            "range end {} is before start {}",
            end, start
        )));
    }
    Ok(payments
        .iter()
        .filter(|p| p.customer_name == customer_name && p.date >= start && p.date <= end)
        .map(|p| p.amount)
        .sum())
}

pub fn required_yearly(total_debt: Decimal) -> Result<Decimal> {
    check_debt(total_debt)?;
    Ok(total_debt / Decimal::from(YEARS_IN_HORIZON))
}

pub fn year_summary(
    total_debt: Decimal,
    payments: &[Payment],
    customer_name: &str,
    year: i32,
) -> Result<YearSummary> {
    let required = required_yearly(total_debt)?;
    let (start, end) = fiscal_year_bounds(year)?;
    let paid = sum_payments_in_range(payments, customer_name, start, end)?;
    Ok(YearSummary {
        fiscal_year: year,
        label: fiscal_year_label(year),
        required_yearly: required,
        paid,
        balance: required - paid,
    })
}

/// No penalty is assessed until `today` is strictly past `year_end`; after
/// that the full rate applies however late it is.
pub fn penalty_for_year(balance: Decimal, today: NaiveDate, year_end: NaiveDate) -> Decimal {
    if today <= year_end {
        return Decimal::ZERO;
    }
    balance.max(Decimal::ZERO) * PENALTY_RATE
}

/// Total debt less everything paid from the start of `current_fiscal_year - 3`
/// to the end of `current_fiscal_year`.
///
/// Kept separate from [`four_year_history`]: the two cover the same years
/// today but are defined independently.
pub fn four_year_rollup(
    total_debt: Decimal,
    payments: &[Payment],
    customer_name: &str,
    current_fiscal_year: i32,
) -> Result<Rollup> {
    check_debt(total_debt)?;
    let (window_start, _) = fiscal_year_bounds(current_fiscal_year - (YEARS_IN_HORIZON - 1))?;
    let (_, window_end) = fiscal_year_bounds(current_fiscal_year)?;
    let paid = sum_payments_in_range(payments, customer_name, window_start, window_end)?;
    Ok(Rollup {
        window_start,
        window_end,
        paid,
        total_remaining: total_debt - paid,
    })
}

/// Year summaries for `current_fiscal_year` and the three years before it,
/// most recent first. Nothing is computed until the iterator is driven.
pub fn four_year_history<'a>(
    total_debt: Decimal,
    payments: &'a [Payment],
    customer_name: &'a str,
    current_fiscal_year: i32,
) -> impl Iterator<Item = Result<YearSummary>> + 'a {
    (0..YEARS_IN_HORIZON)
        .map(move |back| year_summary(total_debt, payments, customer_name, current_fiscal_year - back))
}

pub fn fiscal_range(year: i32) -> Result<FiscalRange> {
    let (start, end) = fiscal_year_bounds(year)?;
    Ok(FiscalRange {
        fiscal_year: year,
        label: fiscal_year_label(year),
        start,
        end,
    })
}

pub fn fiscal_ranges(first_year: i32, count: usize) -> Result<Vec<FiscalRange>> {
    (0..count)
        .map(|i| {
            let offset = i32::try_from(i)
                .map_err(|_| LedgerError::InvalidInput(format!("too many ranges: {}", count)))?;
            fiscal_range(first_year + offset)
        })
        .collect()
}

pub fn fiscal_range_report(
    total_debt: Decimal,
    payments: &[Payment],
    customer_name: &str,
    year: i32,
    today: NaiveDate,
) -> Result<FiscalRangeReport> {
    let range = fiscal_range(year)?;
    let summary = year_summary(total_debt, payments, customer_name, year)?;
    let shortage = summary.balance.max(Decimal::ZERO);
    Ok(FiscalRangeReport {
        closed: today > range.end,
        penalty: penalty_for_year(summary.balance, today, range.end),
        range,
        required_yearly: summary.required_yearly,
        paid: summary.paid,
        shortage,
    })
}

fn check_debt(total_debt: Decimal) -> Result<()> {
    if total_debt < Decimal::ZERO {
        return Err(LedgerError::InvalidInput(format!(
            "total debt must not be negative, got {}",
            total_debt
        )));
    }
    Ok(())
}
