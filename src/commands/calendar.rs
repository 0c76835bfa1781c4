// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::{CalendarCursor, Locale, YearMonth};
use crate::commands::operations::OperationRow;
use crate::error::Error;
use crate::page::CalendarPage;
use crate::utils::{fmt_money, get_locale, parse_month, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::fmt::Write;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let start = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => CalendarCursor::today().year_month(),
    };
    let prev = *sub.get_one::<u32>("prev").unwrap_or(&0);
    let next = *sub.get_one::<u32>("next").unwrap_or(&0);
    let target = target_month(start, prev, next)?;
    let mut page = CalendarPage::open(conn, CalendarCursor::new(target))?;
    if let Some(day) = sub.get_one::<u32>("select") {
        page.toggle_day(*day)?;
    }
    let today = chrono::Local::now().date_naive();
    print!("{}", render(&page, today, get_locale(conn)?)?);
    Ok(())
}

/// `start` moved back `prev` and forward `next` months in one step.
pub fn target_month(start: YearMonth, prev: u32, next: u32) -> Result<YearMonth, Error> {
    let delta = i64::from(next) - i64::from(prev);
    i32::try_from(delta)
        .ok()
        .and_then(|d| start.shifted(d))
        .ok_or_else(|| Error::Range(format!("{} shifted by {} months", start, delta)))
}

/// Grid, operation list and balance of the page as text.
pub fn render(page: &CalendarPage<'_>, today: NaiveDate, locale: Locale) -> Result<String> {
    let grid = page.grid(today, locale)?;
    let mut out = String::new();
    writeln!(out, "{}", grid.title)?;
    writeln!(out, "{}", pretty_table(&grid.headers, grid.week_rows()))?;

    let rows: Vec<Vec<String>> = page
        .operations()
        .iter()
        .map(OperationRow::from)
        .map(|r| vec![r.id.to_string(), r.date, r.title, r.amount, r.category, r.kind])
        .collect();
    if rows.is_empty() {
        writeln!(out, "No operations")?;
    } else {
        writeln!(
            out,
            "{}",
            pretty_table(&["Id", "Date", "Title", "Amount", "Category", "Kind"], rows)
        )?;
    }
    writeln!(out, "Balance: {}", fmt_money(&page.balance()))?;
    Ok(out)
}
