// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Settings, set_setting};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap();
            set_setting(conn, key, value)?;
            tracing::info!(key, "setting updated");
            println!("{} = {}", key, value.trim());
        }
        _ => {
            let s = Settings::load(conn)?;
            let rows = vec![
                vec!["currency".to_string(), s.currency],
                vec![
                    "receipt_dir".to_string(),
                    s.receipt_dir.display().to_string(),
                ],
                vec!["issuer".to_string(), s.issuer],
            ];
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
    }
    Ok(())
}
