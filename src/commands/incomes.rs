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
        Some(("add", sub)) => {
            let title = arg(sub, "title")?;
            let amount = parse_decimal(arg(sub, "amount")?)?;
            let month = parse_month(arg(sub, "month")?)?;
            let id = store::add_income(conn, title, amount, month.month(), month.year())?;
            println!("Recorded income #{} '{}' {} for {}", id, title, amount, month);
        }
        Some(("list", sub)) => {
            let month = parse_month(arg(sub, "month")?)?;
            let incomes = store::list_incomes(conn, month.month(), month.year())?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &incomes)? {
                let mut rows: Vec<Vec<String>> = incomes
                    .iter()
                    .map(|i| vec![i.id.to_string(), i.title.clone(), fmt_money(&i.amount)])
                    .collect();
                let total = store::total_monthly_income(conn, month.month(), month.year())?;
                rows.push(vec![String::new(), "Total".into(), fmt_money(&total)]);
                println!("{}", pretty_table(&["Id", "Title", "Amount"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
