// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::models::Customer;
use crate::store::{CustomerRegistry, SqliteStore};
use crate::utils::{fmt_amount, maybe_print_json, money_table, parse_decimal};
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use rusqlite::Connection;
use serde::Deserialize;
use tracing::{info, warn};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if name.is_empty() {
                return Err(anyhow!("Customer name cannot be empty"));
            }
            let total_debt = parse_decimal(sub.get_one::<String>("debt").unwrap())?;
            SqliteStore::new(conn).upsert_customer(&Customer {
                name: name.to_string(),
                total_debt,
            })?;
            info!(customer = name, %total_debt, "customer saved");
            println!("Saved customer '{}' (total debt {})", name, total_debt);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            if SqliteStore::new(conn).remove_customer(name)? {
                info!(customer = name.as_str(), "customer removed");
                println!("Removed customer '{}'", name);
            } else {
                return Err(anyhow!("Customer '{}' not found", name));
            }
        }
        Some(("import", sub)) => import(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let customers = SqliteStore::new(conn).customers()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &customers)? {
        let ccy = Settings::load(conn)?.currency;
        let rows = customers
            .iter()
            .map(|c| vec![c.name.clone(), fmt_amount(&c.total_debt)])
            .collect();
        let hdr = format!("Total debt ({})", ccy);
        println!("{}", money_table(&["Customer", &hdr], rows, 1));
    }
    Ok(())
}

// Header names of the customer spreadsheet are accepted as aliases.
#[derive(Debug, Deserialize)]
struct CustomerRow {
    #[serde(alias = "NAME", alias = "Name")]
    name: String,
    #[serde(alias = "AmountDue", alias = "amount_due")]
    total_debt: String,
}

pub fn import(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    {
        let store = SqliteStore::new(&tx);
        for (idx, result) in rdr.deserialize::<CustomerRow>().enumerate() {
            let line = idx + 2;
            let row = result.with_context(|| format!("Bad customer row at line {}", line))?;
            if row.name.is_empty() {
                warn!(line, "skipping customer row without a name");
                continue;
            }
            let total_debt = parse_decimal(&row.total_debt)
                .with_context(|| format!("Invalid total debt for '{}' at line {}", row.name, line))?;
            store.upsert_customer(&Customer {
                name: row.name,
                total_debt,
            })?;
            count += 1;
        }
    }
    tx.commit()?;
    info!(count, path, "customers imported");
    println!("Imported {} customers from {}", count, path);
    Ok(())
}
