// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::{Locale, YearMonth};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// `YYYY-MM`, or a month name and year such as "March 2025" or "Mars 2025".
pub fn parse_month(s: &str) -> Result<YearMonth> {
    if let Some((name, year)) = s.trim().rsplit_once(char::is_whitespace) {
        let year: i32 = year
            .parse()
            .with_context(|| format!("Invalid year in '{}'", s))?;
        let month = Locale::En
            .month_number(name)
            .or_else(|_| Locale::Fr.month_number(name))?;
        return Ok(YearMonth::new(year, month)?);
    }
    s.parse::<YearMonth>()
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub const SETTING_KEYS: [&str; 1] = ["locale"];

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT Value FROM Settings WHERE Key = ?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    if !SETTING_KEYS.contains(&key) {
        anyhow::bail!("Unknown setting '{}' (known: {})", key, SETTING_KEYS.join(", "));
    }
    let value = match key {
        "locale" => value.parse::<Locale>()?.code().to_string(),
        _ => value.trim().to_string(),
    };
    conn.execute(
        "INSERT INTO Settings(Key, Value) VALUES(?1, ?2)
         ON CONFLICT(Key) DO UPDATE SET Value = excluded.Value",
        params![key, value],
    )?;
    tracing::info!(key, value = %value, "setting updated");
    Ok(())
}

pub fn get_locale(conn: &Connection) -> Result<Locale> {
    match get_setting(conn, "locale")? {
        Some(v) => v
            .parse::<Locale>()
            .with_context(|| format!("Stored locale '{}' is invalid", v)),
        None => Ok(Locale::default()),
    }
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// A required or defaulted string argument, trimmed.
pub fn arg<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .with_context(|| format!("Missing argument --{}", name))
}

/// `--month` if given, otherwise the current month.
pub fn month_or_current(m: &clap::ArgMatches) -> Result<YearMonth> {
    match m.get_one::<String>("month") {
        Some(s) => parse_month(s),
        None => Ok(YearMonth::of(chrono::Local::now().date_naive())),
    }
}
