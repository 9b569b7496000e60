// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use std::path::PathBuf;

pub const KEYS: &[&str] = &["currency", "receipt_dir", "issuer"];

/// Persistent settings, stored as key/value rows in the `settings` table.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Label printed after every amount.
    pub currency: String,
    /// Where receipts are written.
    pub receipt_dir: PathBuf,
    /// Receipt heading.
    pub issuer: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "THB".to_string(),
            receipt_dir: PathBuf::from("."),
            issuer: "Receipt".to_string(),
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            currency: get_setting(conn, "currency")?.unwrap_or(defaults.currency),
            receipt_dir: get_setting(conn, "receipt_dir")?
                .map(PathBuf::from)
                .unwrap_or(defaults.receipt_dir),
            issuer: get_setting(conn, "issuer")?.unwrap_or(defaults.issuer),
        })
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    if !KEYS.contains(&key) {
        return Err(anyhow!(
            "Unknown setting '{}' (expected one of: {})",
            key,
            KEYS.join(", ")
        ));
    }
    let value = value.trim();
    if value.is_empty() {
        return Err(anyhow!("Setting '{}' cannot be empty", key));
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}
