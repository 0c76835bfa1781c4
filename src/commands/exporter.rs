// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::arg;
use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn export_operations(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = arg(sub, "format")?.to_lowercase();
    let out = arg(sub, "out")?;

    let mut ops = store::list_operations(conn)?;
    ops.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "title", "amount", "category", "recurring"])?;
            for op in &ops {
                wtr.write_record([
                    op.id.to_string(),
                    op.date.to_string(),
                    op.title.clone(),
                    op.amount.to_string(),
                    op.category.clone(),
                    op.recurring.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = ops
                .iter()
                .map(|op| {
                    json!({
                        "id": op.id, "date": op.date.to_string(), "title": op.title,
                        "amount": op.amount.to_string(), "category": op.category,
                        "recurring": op.recurring
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    tracing::info!(count = ops.len(), out, "exported operations");
    println!("Exported {} operations to {}", ops.len(), out);
    Ok(())
}
