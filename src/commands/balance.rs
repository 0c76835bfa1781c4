// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{fmt_money, maybe_print_json, month_or_current, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let summary = store::month_summary(conn, month)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        let data = vec![
            vec!["Budget".to_string(), fmt_money(&summary.budget)],
            vec!["Income".to_string(), fmt_money(&summary.income)],
            vec!["Operations".to_string(), fmt_money(&summary.operations)],
            vec!["Balance".to_string(), fmt_money(&summary.balance)],
        ];
        let title = month.to_string();
        println!("{}", pretty_table(&[title.as_str(), ""], data));
    }
    Ok(())
}
