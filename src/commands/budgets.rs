// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{arg, fmt_money, maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(arg(sub, "month")?)?;
    let amount = parse_decimal(arg(sub, "amount")?)?;
    store::set_monthly_budget(conn, month.month(), month.year(), amount)?;
    println!("Budget set for {} = {}", month, amount);
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(arg(sub, "month")?)?;
    let budget = store::monthly_budget(conn, month.month(), month.year())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budget)? {
        return Ok(());
    }
    let shown = budget
        .map(|b| fmt_money(&b.amount))
        .unwrap_or_else(|| "(none)".into());
    println!(
        "{}",
        pretty_table(&["Month", "Budget"], vec![vec![month.to_string(), shown]])
    );
    Ok(())
}
