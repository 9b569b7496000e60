// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// Returns `(issue, detail)` pairs; empty when the store looks healthy.
pub fn findings(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Payments whose customer is no longer in the registry
    let mut stmt = conn.prepare(
        "SELECT DISTINCT customer_name FROM payments EXCEPT SELECT name FROM customers ORDER BY 1",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let c: String = r.get(0)?;
        rows.push(vec!["payment_unknown_customer".into(), c]);
    }

    // 2) Identical rows; still counted, but usually a double entry
    let mut stmt2 = conn.prepare(
        "SELECT customer_name, date, amount, COUNT(*) FROM payments
         GROUP BY customer_name, date, amount HAVING COUNT(*) > 1
         ORDER BY customer_name, date",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let c: String = r.get(0)?;
        let d: String = r.get(1)?;
        let a: String = r.get(2)?;
        let n: i64 = r.get(3)?;
        rows.push(vec![
            "duplicate_payment".into(),
            format!("{} {} {} x{}", c, d, a, n),
        ]);
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = findings(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        tracing::warn!(issues = rows.len(), "doctor found issues");
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
