// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Customer registry and payment store ports, with the SQLite implementation.

use crate::models::{Customer, Payment};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub trait CustomerRegistry {
    fn total_debt(&self, name: &str) -> Result<Option<Decimal>>;
    fn customers(&self) -> Result<Vec<Customer>>;
}

/// Read side: hands out a snapshot the engine can borrow.
pub trait PaymentSource {
    fn payments_for(&self, customer_name: &str) -> Result<Vec<Payment>>;
    fn all_payments(&self) -> Result<Vec<Payment>>;
}

/// Write side: payments are only ever appended.
pub trait PaymentSink {
    fn append(&self, payment: &Payment) -> Result<()>;
}

/// Looks up a customer's total debt, failing if the registry has no such name.
pub fn resolve_debt<R: CustomerRegistry + ?Sized>(registry: &R, name: &str) -> Result<Decimal> {
    registry
        .total_debt(name)?
        .ok_or_else(|| anyhow!("Customer '{}' not found", name))
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn upsert_customer(&self, customer: &Customer) -> Result<()> {
        if customer.total_debt < Decimal::ZERO {
            return Err(anyhow!(
                "Total debt for '{}' must not be negative ({})",
                customer.name,
                customer.total_debt
            ));
        }
        self.conn.execute(
            "INSERT INTO customers(name, total_debt) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET total_debt=excluded.total_debt",
            params![customer.name, customer.total_debt.to_string()],
        )?;
        Ok(())
    }

    pub fn remove_customer(&self, name: &str) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM customers WHERE name=?1", params![name])?;
        Ok(n > 0)
    }

    fn query_payments(&self, customer_name: Option<&str>) -> Result<Vec<Payment>> {
        let mut stmt = self.conn.prepare(
            "SELECT customer_name, date, amount, note FROM payments
             WHERE ?1 IS NULL OR customer_name=?1
             ORDER BY date, id",
        )?;
        let rows = stmt.query_map(params![customer_name], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, Option<String>>(3)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (name, d, amt_s, note) = row?;
            let date = NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                .with_context(|| format!("Invalid payment date '{}' for {}", d, name))?;
            let amount = amt_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid payment amount '{}' for {}", amt_s, name))?;
            out.push(Payment {
                customer_name: name,
                date,
                amount,
                note: note.filter(|n| !n.is_empty()),
            });
        }
        Ok(out)
    }
}

impl CustomerRegistry for SqliteStore<'_> {
    fn total_debt(&self, name: &str) -> Result<Option<Decimal>> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT total_debt FROM customers WHERE name=?1",
                params![name],
                |r| r.get(0),
            )
            .optional()?;
        v.map(|s| {
            s.parse::<Decimal>()
                .with_context(|| format!("Invalid total debt '{}' for {}", s, name))
        })
        .transpose()
    }

    fn customers(&self) -> Result<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, total_debt FROM customers ORDER BY name")?;
        let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
        let mut out = Vec::new();
        for row in rows {
            let (name, debt_s) = row?;
            let total_debt = debt_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid total debt '{}' for {}", debt_s, name))?;
            out.push(Customer { name, total_debt });
        }
        Ok(out)
    }
}

impl PaymentSource for SqliteStore<'_> {
    fn payments_for(&self, customer_name: &str) -> Result<Vec<Payment>> {
        self.query_payments(Some(customer_name))
    }

    fn all_payments(&self) -> Result<Vec<Payment>> {
        self.query_payments(None)
    }
}

impl PaymentSink for SqliteStore<'_> {
    fn append(&self, payment: &Payment) -> Result<()> {
        if payment.amount < Decimal::ZERO {
            return Err(anyhow!(
                "Payment amount must not be negative ({})",
                payment.amount
            ));
        }
        self.conn.execute(
            "INSERT INTO payments(customer_name, date, amount, note) VALUES (?1, ?2, ?3, ?4)",
            params![
                payment.customer_name,
                payment.date.to_string(),
                payment.amount.to_string(),
                payment.note.as_deref()
            ],
        )?;
        Ok(())
    }
}
