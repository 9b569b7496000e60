// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::snapshot;
use crate::config::Settings;
use crate::engine;
use crate::utils::{date_arg_or_today, fmt_amount, maybe_print_json, money_table, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ranges", sub)) => ranges(sub),
        _ => year_report(conn, m),
    }
}

fn ranges(sub: &clap::ArgMatches) -> Result<()> {
    let from = match sub.get_one::<i32>("from") {
        Some(y) => *y,
        None => engine::current_fiscal_year(chrono::Local::now().date_naive()),
    };
    let count = *sub.get_one::<usize>("count").unwrap_or(&4);
    let data = engine::fiscal_ranges(from, count)?
        .into_iter()
        .map(|r| {
            vec![
                r.label,
                r.start.format("%d/%m/%Y").to_string(),
                r.end.format("%d/%m/%Y").to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Fiscal year", "Start", "End"], data));
    Ok(())
}

fn year_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let customer = sub
        .get_one::<String>("customer")
        .context("--customer is required for a fiscal year report")?;
    let year = *sub
        .get_one::<i32>("year")
        .context("--year is required for a fiscal year report")?;
    let today = date_arg_or_today(sub, "today")?;
    let (total_debt, payments) = snapshot(conn, customer)?;
    let report = engine::fiscal_range_report(total_debt, &payments, customer, year, today)?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    println!(
        "Report: {} ({} - {})",
        report.range.label,
        report.range.start.format("%d/%m/%Y"),
        report.range.end.format("%d/%m/%Y")
    );
    if !report.closed {
        println!("The fiscal year has not ended yet, so no penalty is assessed.");
        return Ok(());
    }
    let ccy = Settings::load(conn)?.currency;
    let required_hdr = format!("Required ({})", ccy);
    let row = vec![vec![
        fmt_amount(&report.required_yearly),
        fmt_amount(&report.paid),
        fmt_amount(&report.shortage),
        fmt_amount(&report.penalty),
    ]];
    println!(
        "{}",
        money_table(
            &[required_hdr.as_str(), "Paid", "Shortage", "Penalty"],
            row,
            0
        )
    );
    Ok(())
}
