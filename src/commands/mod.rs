// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod customers;
pub mod doctor;
pub mod payments;
pub mod reports;
pub mod settings;
pub mod summary;

use crate::models::Payment;
use crate::store::{PaymentSource, SqliteStore, resolve_debt};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Total debt plus a payment snapshot for one customer, ready for the engine.
pub fn snapshot(conn: &Connection, customer: &str) -> Result<(Decimal, Vec<Payment>)> {
    let store = SqliteStore::new(conn);
    let total_debt = resolve_debt(&store, customer)?;
    let payments = store.payments_for(customer)?;
    tracing::debug!(customer, %total_debt, payments = payments.len(), "loaded snapshot");
    Ok((total_debt, payments))
}
