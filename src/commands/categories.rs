// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::DEFAULT_CATEGORIES;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// Suggested labels followed by any other label already in use.
pub fn known_categories(conn: &Connection) -> Result<Vec<String>> {
    let mut out: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
    let mut stmt = conn.prepare(
        "SELECT DISTINCT Category FROM FinancialOperations
         WHERE Category IS NOT NULL AND Category <> '' ORDER BY Category",
    )?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    for row in rows {
        let c = row?;
        if !out.contains(&c) {
            out.push(c);
        }
    }
    Ok(out)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let data = known_categories(conn)?
        .into_iter()
        .map(|c| vec![c])
        .collect();
    println!("{}", pretty_table(&["Category"], data));
    Ok(())
}
