// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Printable payment receipt.

use crate::config::Settings;
use crate::engine::fiscal_year_label;
use crate::utils::fmt_amount;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const WIDTH: usize = 60;
const LABEL_WIDTH: usize = 32;

#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub customer_name: String,
    pub payment_date: NaiveDate,
    pub amount_paid: Decimal,
    pub penalty: Decimal,
    pub fiscal_year: i32,
    pub paid_this_year: Decimal,
    pub remaining_this_year: Decimal,
    pub remaining_four_years: Decimal,
    pub note: Option<String>,
}

impl Receipt {
    pub fn total_with_penalty(&self) -> Decimal {
        self.amount_paid + self.penalty
    }

    /// `receipt_<customer>_<YYYYMMDD>.txt`, with path separators in the name replaced.
    pub fn file_name(&self) -> String {
        let safe: String = self
            .customer_name
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        format!(
            "receipt_{}_{}.txt",
            safe.trim(),
            self.payment_date.format("%Y%m%d")
        )
    }

    pub fn render(&self, settings: &Settings) -> String {
        let ccy = settings.currency.as_str();
        let mut out = String::new();
        let rule = "-".repeat(WIDTH);

        let _ = writeln!(out, "{}", settings.issuer);
        let _ = writeln!(out);
        let _ = writeln!(out, "Name: {}", self.customer_name);
        let _ = writeln!(out, "Payment date: {}", self.payment_date.format("%d/%m/%Y"));
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out);

        let line = |out: &mut String, label: &str, amount: &Decimal| {
            let value = format!("{} {}", fmt_amount(amount), ccy);
            let _ = writeln!(
                out,
                "{:<lw$}{:>vw$}",
                label,
                value,
                lw = LABEL_WIDTH,
                vw = WIDTH - LABEL_WIDTH
            );
        };
        line(&mut out, "Amount paid:", &self.amount_paid);
        line(&mut out, "Penalty (if any):", &self.penalty);
        line(&mut out, "Total (incl. penalty):", &self.total_with_penalty());
        let _ = writeln!(out);
        line(
            &mut out,
            &format!("Paid in {}:", fiscal_year_label(self.fiscal_year)),
            &self.paid_this_year,
        );
        line(&mut out, "Remaining this year:", &self.remaining_this_year);
        line(&mut out, "Remaining over 4 years:", &self.remaining_four_years);
        let _ = writeln!(out);
        let _ = writeln!(out, "Note: {}", self.note.as_deref().unwrap_or(""));
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<half$}{:>half$}",
            "Received by ..................",
            "Paid by ..................",
            half = WIDTH / 2
        );
        out
    }

    pub fn write_to(&self, dir: &Path, settings: &Settings) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Create receipt dir {}", dir.display()))?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.render(settings))
            .with_context(|| format!("Write receipt {}", path.display()))?;
        Ok(path)
    }
}
