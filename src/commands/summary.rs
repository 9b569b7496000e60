// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::snapshot;
use crate::config::Settings;
use crate::engine;
use crate::models::{Payment, YearSummary};
use crate::utils::{date_arg_or_today, fmt_amount, fmt_money, maybe_print_json, money_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

/// Figures shown right after a payment and by `status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub customer: String,
    pub total_debt: Decimal,
    pub fiscal_year: i32,
    pub label: String,
    pub paid_this_year: Decimal,
    pub remaining_this_year: Decimal,
    pub penalty: Decimal,
    pub remaining_four_years: Decimal,
}

/// The fiscal year comes from `reference_date`; the penalty is judged at `today`.
pub fn compute_status(
    customer: &str,
    total_debt: Decimal,
    payments: &[Payment],
    reference_date: NaiveDate,
    today: NaiveDate,
) -> Result<StatusView> {
    let fy = engine::current_fiscal_year(reference_date);
    let (_, year_end) = engine::fiscal_year_bounds(fy)?;
    let year = engine::year_summary(total_debt, payments, customer, fy)?;
    let rollup = engine::four_year_rollup(total_debt, payments, customer, fy)?;
    Ok(StatusView {
        customer: customer.to_string(),
        total_debt,
        fiscal_year: fy,
        label: year.label,
        paid_this_year: year.paid,
        remaining_this_year: year.balance,
        penalty: engine::penalty_for_year(year.balance, today, year_end),
        remaining_four_years: rollup.total_remaining,
    })
}

pub fn print_status(view: &StatusView, ccy: &str) {
    println!("Total debt:              {}", fmt_money(&view.total_debt, ccy));
    println!(
        "Paid in {}:       {}",
        view.label,
        fmt_money(&view.paid_this_year, ccy)
    );
    println!(
        "Remaining this year:     {}",
        fmt_money(&view.remaining_this_year, ccy)
    );
    println!("Penalty (if any):        {}", fmt_money(&view.penalty, ccy));
    println!(
        "Remaining over 4 years:  {}",
        fmt_money(&view.remaining_four_years, ccy)
    );
}

pub fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let customer = sub.get_one::<String>("customer").unwrap();
    let reference = date_arg_or_today(sub, "date")?;
    let today = date_arg_or_today(sub, "today")?;
    let (total_debt, payments) = snapshot(conn, customer)?;
    let view = compute_status(customer, total_debt, &payments, reference, today)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        print_status(&view, &Settings::load(conn)?.currency);
    }
    Ok(())
}

pub fn history_rows(
    customer: &str,
    total_debt: Decimal,
    payments: &[Payment],
    reference_date: NaiveDate,
) -> Result<Vec<YearSummary>> {
    let fy = engine::current_fiscal_year(reference_date);
    let rows = engine::four_year_history(total_debt, payments, customer, fy)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let customer = sub.get_one::<String>("customer").unwrap();
    let reference = date_arg_or_today(sub, "date")?;
    let (total_debt, payments) = snapshot(conn, customer)?;
    let rows = history_rows(customer, total_debt, &payments, reference)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.label.clone(),
                    fmt_amount(&r.required_yearly),
                    fmt_amount(&r.paid),
                    fmt_amount(&r.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            money_table(&["Fiscal year", "Required", "Paid", "Balance"], data, 1)
        );
    }
    Ok(())
}
