// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub total_debt: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub customer_name: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub note: Option<String>,
}

impl Payment {
    pub fn new(customer_name: &str, date: NaiveDate, amount: Decimal) -> Self {
        Self {
            customer_name: customer_name.to_string(),
            date,
            amount,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// One fiscal year's obligation against what was paid inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub fiscal_year: i32,
    pub label: String, // "2025-2026"
    pub required_yearly: Decimal,
    pub paid: Decimal,
    pub balance: Decimal, // negative means overpaid
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rollup {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub paid: Decimal,
    pub total_remaining: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalRange {
    pub fiscal_year: i32,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalRangeReport {
    pub range: FiscalRange,
    pub required_yearly: Decimal,
    pub paid: Decimal,
    pub shortage: Decimal,
    pub penalty: Decimal,
    pub closed: bool,
}
