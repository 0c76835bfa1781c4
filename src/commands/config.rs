// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{SETTING_KEYS, arg, get_setting, pretty_table, set_setting};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = arg(sub, "key")?;
            let value = arg(sub, "value")?;
            set_setting(conn, key, value)?;
            println!("{} = {}", key, value);
        }
        Some(("show", _)) => {
            let mut rows = Vec::new();
            for key in SETTING_KEYS {
                let v = get_setting(conn, key)?.unwrap_or_else(|| "(default)".into());
                rows.push(vec![key.to_string(), v]);
            }
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
