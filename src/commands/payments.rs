// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::snapshot;
use crate::commands::summary::{compute_status, print_status};
use crate::config::Settings;
use crate::models::Payment;
use crate::receipt::Receipt;
use crate::store::{CustomerRegistry, PaymentSink, SqliteStore};
use crate::utils::{date_arg_or_today, fmt_amount, maybe_print_json, money_table, parse_date, parse_decimal};
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub),
        Some(("import", sub)) => import(conn, sub),
        Some(("export", sub)) => export(conn, sub),
        _ => Ok(()),
    }
}

/// Appends the payment, prints the updated balances and writes a receipt.
pub fn pay(conn: &Connection, sub: &clap::ArgMatches) -> Result<Option<std::path::PathBuf>> {
    let customer = sub.get_one::<String>("customer").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = date_arg_or_today(sub, "date")?;
    let today = date_arg_or_today(sub, "today")?;
    let note = sub
        .get_one::<String>("note")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let store = SqliteStore::new(conn);
    if store.total_debt(customer)?.is_none() {
        return Err(anyhow!("Customer '{}' not found", customer));
    }
    let payment = Payment {
        customer_name: customer.clone(),
        date,
        amount,
        note: note.clone(),
    };
    store.append(&payment)?;
    info!(customer = customer.as_str(), %amount, %date, "payment recorded");
    println!("Recorded {} from '{}' on {}", amount, customer, date);

    let settings = Settings::load(conn)?;
    let (total_debt, payments) = snapshot(conn, customer)?;
    let view = compute_status(customer, total_debt, &payments, date, today)?;
    print_status(&view, &settings.currency);

    if sub.get_flag("no_receipt") {
        return Ok(None);
    }
    let receipt = Receipt {
        customer_name: customer.clone(),
        payment_date: date,
        amount_paid: amount,
        penalty: view.penalty,
        fiscal_year: view.fiscal_year,
        paid_this_year: view.paid_this_year,
        remaining_this_year: view.remaining_this_year,
        remaining_four_years: view.remaining_four_years,
        note,
    };
    let path = receipt.write_to(&settings.receipt_dir, &settings)?;
    info!(path = %path.display(), "receipt written");
    println!("Receipt saved to {}", path.display());
    Ok(Some(path))
}

#[derive(Debug, Serialize)]
pub struct PaymentRow {
    pub date: String,
    pub customer: String,
    pub amount: String,
    pub note: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<PaymentRow>> {
    let mut sql = String::from("SELECT date, customer_name, amount, note FROM payments WHERE 1=1");
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(c) = sub.get_one::<String>("customer") {
        sql.push_str(" AND customer_name=?");
        params_vec.push(c.clone());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let note: Option<String> = r.get(3)?;
        data.push(PaymentRow {
            date: r.get(0)?,
            customer: r.get(1)?,
            amount: r.get(2)?,
            note: note.unwrap_or_default(),
        });
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let mut rows = Vec::with_capacity(data.len());
        for r in &data {
            let amount = parse_decimal(&r.amount)?;
            rows.push(vec![
                r.date.clone(),
                r.customer.clone(),
                r.note.clone(),
                fmt_amount(&amount),
            ]);
        }
        println!(
            "{}",
            money_table(&["Date", "Customer", "Note", "Amount"], rows, 3)
        );
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct PaymentCsvRow {
    #[serde(alias = "customer_name")]
    customer: String,
    date: String,
    amount: String,
    #[serde(default)]
    note: Option<String>,
}

pub fn import(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    {
        let store = SqliteStore::new(&tx);
        let known: HashSet<String> = store.customers()?.into_iter().map(|c| c.name).collect();
        for (idx, result) in rdr.deserialize::<PaymentCsvRow>().enumerate() {
            let line = idx + 2;
            let row = result.with_context(|| format!("Bad payment row at line {}", line))?;
            if !known.contains(&row.customer) {
                return Err(anyhow!(
                    "Customer '{}' not found (line {})",
                    row.customer,
                    line
                ));
            }
            let date = parse_date(&row.date)
                .with_context(|| format!("Invalid payment date at line {}", line))?;
            let amount = parse_decimal(&row.amount)
                .with_context(|| format!("Invalid amount for '{}' at line {}", row.customer, line))?;
            let note = row.note.filter(|n| !n.is_empty());
            store.append(&Payment {
                customer_name: row.customer,
                date,
                amount,
                note,
            })?;
            count += 1;
        }
    }
    tx.commit()?;
    info!(count, path, "payments imported");
    println!("Imported {} payments from {}", count, path);
    Ok(())
}

pub fn export(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    let mut stmt =
        conn.prepare("SELECT customer_name, date, amount, note FROM payments ORDER BY date, id")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut count = 0usize;
    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
        wtr.write_record(["customer", "date", "amount", "note"])?;
        for row in rows {
            let (c, d, a, n) = row?;
            wtr.write_record([c, d, a, n.unwrap_or_default()])?;
            count += 1;
        }
        wtr.flush()?;
    } else {
        let mut items = Vec::new();
        for row in rows {
            let (c, d, a, n) = row?;
            items.push(serde_json::json!({
                "customer": c, "date": d, "amount": a, "note": n
            }));
        }
        count = items.len();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)
            .with_context(|| format!("Write {}", out))?;
    }
    if count == 0 {
        warn!(out = out.as_str(), "exported an empty payment history");
    }
    println!("Exported {} payments to {}", count, out);
    Ok(())
}
