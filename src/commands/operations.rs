// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{FinancialOperation, NewOperation, parse_recurrence};
use crate::store;
use crate::utils::{
    arg, fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("export", sub)) => crate::commands::exporter::export_operations(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn new_operation(sub: &clap::ArgMatches) -> Result<NewOperation> {
    Ok(NewOperation {
        title: arg(sub, "title")?.to_string(),
        amount: parse_decimal(arg(sub, "amount")?)?,
        date: parse_date(arg(sub, "date")?)?,
        category: arg(sub, "category")?.to_string(),
        recurring: parse_recurrence(arg(sub, "kind")?)?,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let op = new_operation(sub)?;
    let id = store::add_operation(conn, &op)?;
    println!(
        "Recorded #{} {} on {} '{}' ({}, {})",
        id,
        op.amount,
        op.date,
        op.title.trim(),
        op.category.trim(),
        crate::models::recurrence_label(op.recurring)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow::anyhow!("Missing argument --id"))?;
    if store::delete_operation(conn, id)? {
        println!("Removed operation #{}", id);
    } else {
        println!("No operation #{}", id);
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.title.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.kind.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Title", "Amount", "Category", "Kind"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct OperationRow {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub amount: String,
    pub category: String,
    pub kind: String,
}

impl From<&FinancialOperation> for OperationRow {
    fn from(op: &FinancialOperation) -> Self {
        Self {
            id: op.id,
            date: op.date.to_string(),
            title: op.title.clone(),
            amount: fmt_money(&op.amount),
            category: op.category.clone(),
            kind: op.kind_label().to_string(),
        }
    }
}

/// With `--month`, applies the month filter (and `--day`); otherwise every
/// operation. Newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<OperationRow>> {
    let all = store::list_operations(conn)?;
    let mut ops = match sub.get_one::<String>("month") {
        Some(month) => {
            let ym = parse_month(month)?;
            let visible = store::visible_for_month(&all, ym.year(), ym.month());
            match sub.get_one::<u32>("day") {
                Some(day) => store::visible_on_day(&visible, *day),
                None => visible,
            }
        }
        None => all,
    };
    ops.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    Ok(ops.iter().map(OperationRow::from).collect())
}
