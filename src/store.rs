// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence of operations, budgets and incomes, plus the month filter.

use crate::calendar::YearMonth;
use crate::error::{Error, Result};
use crate::models::{FinancialOperation, MonthlyBudget, MonthlyIncome, NewOperation};
use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

fn to_real(amount: Decimal) -> Result<f64> {
    amount
        .to_f64()
        .ok_or_else(|| Error::InvalidInput(format!("amount {} does not fit a REAL", amount)))
}

fn from_real(v: f64) -> Result<Decimal> {
    Decimal::try_from(v).map_err(|e| Error::Corrupt(format!("amount {}: {}", v, e)))
}

/// Dates are written by `NaiveDate::to_string`, so years past 9999 or before 0
/// carry a sign and more digits. A datetime text is cut at its first space or `T`.
fn parse_stored_date(s: &str) -> Result<NaiveDate> {
    let text = s.trim();
    let head = text.split([' ', 'T']).next().unwrap_or(text);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .map_err(|e| Error::Corrupt(format!("date '{}': {}", s, e)))
}

fn check_month(month: u32) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(Error::Range(format!("month {} not in 1..=12", month)))
    }
}

/// Trims text fields and rejects empty title/category or a zero amount.
pub fn validate(op: &NewOperation) -> Result<NewOperation> {
    let title = op.title.trim();
    if title.is_empty() {
        return Err(Error::InvalidInput("title must not be empty".into()));
    }
    let category = op.category.trim();
    if category.is_empty() {
        return Err(Error::InvalidInput("category must not be empty".into()));
    }
    if op.amount.is_zero() {
        return Err(Error::InvalidInput("amount must not be zero".into()));
    }
    Ok(NewOperation {
        title: title.to_string(),
        amount: op.amount,
        date: op.date,
        category: category.to_string(),
        recurring: op.recurring,
    })
}

pub fn add_operation(conn: &Connection, op: &NewOperation) -> Result<i64> {
    let op = validate(op).inspect_err(|e| tracing::warn!("rejected operation: {e}"))?;
    conn.execute(
        "INSERT INTO FinancialOperations(Title, Amount, Date, Category, IsRecurrent)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            op.title,
            to_real(op.amount)?,
            op.date.to_string(),
            op.category,
            op.recurring
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, title = %op.title, amount = %op.amount, date = %op.date, "operation added");
    Ok(id)
}

/// Returns whether a row was removed. Unknown ids are not an error.
pub fn delete_operation(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM FinancialOperations WHERE Id = ?1", params![id])?;
    tracing::info!(id, removed = n, "operation delete");
    Ok(n > 0)
}

fn operation_from_row(r: &Row<'_>) -> Result<FinancialOperation> {
    let date: String = r.get(3)?;
    let category: Option<String> = r.get(4)?;
    Ok(FinancialOperation {
        id: r.get(0)?,
        title: r.get(1)?,
        amount: from_real(r.get(2)?)?,
        date: parse_stored_date(&date)?,
        category: category.unwrap_or_default(),
        recurring: r.get(5)?,
    })
}

const SELECT_OPERATIONS: &str =
    "SELECT Id, Title, Amount, Date, Category, IsRecurrent FROM FinancialOperations";

pub fn list_operations(conn: &Connection) -> Result<Vec<FinancialOperation>> {
    let mut stmt = conn.prepare(SELECT_OPERATIONS)?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(operation_from_row(r)?);
    }
    tracing::debug!(count = data.len(), "listed operations");
    Ok(data)
}

pub fn get_operation(conn: &Connection, id: i64) -> Result<Option<FinancialOperation>> {
    let mut stmt = conn.prepare(&format!("{} WHERE Id = ?1", SELECT_OPERATIONS))?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => Ok(Some(operation_from_row(r)?)),
        None => Ok(None),
    }
}

/// Operations dated in (year, month), plus every recurring operation.
pub fn visible_for_month(
    ops: &[FinancialOperation],
    year: i32,
    month: u32,
) -> Vec<FinancialOperation> {
    ops.iter()
        .filter(|op| (op.date.year() == year && op.date.month() == month) || op.recurring)
        .cloned()
        .collect()
}

/// Narrows a month-scoped list to one day of month.
pub fn visible_on_day(ops: &[FinancialOperation], day: u32) -> Vec<FinancialOperation> {
    ops.iter().filter(|op| op.date.day() == day).cloned().collect()
}

pub fn set_monthly_budget(conn: &Connection, month: u32, year: i32, amount: Decimal) -> Result<()> {
    check_month(month)?;
    conn.execute(
        "INSERT INTO MonthlyBudgets(Month, Year, Budget) VALUES (?1, ?2, ?3)
         ON CONFLICT(Month, Year) DO UPDATE SET Budget = excluded.Budget",
        params![month, year, to_real(amount)?],
    )?;
    tracing::info!(month, year, amount = %amount, "budget set");
    Ok(())
}

/// The stored budget row for (month, year), if any.
pub fn monthly_budget(conn: &Connection, month: u32, year: i32) -> Result<Option<MonthlyBudget>> {
    check_month(month)?;
    let v: Option<f64> = conn
        .query_row(
            "SELECT Budget FROM MonthlyBudgets WHERE Month = ?1 AND Year = ?2",
            params![month, year],
            |r| r.get(0),
        )
        .optional()?;
    Ok(match v {
        Some(amount) => Some(MonthlyBudget {
            month,
            year,
            amount: from_real(amount)?,
        }),
        None => None,
    })
}

pub fn get_monthly_budget(conn: &Connection, month: u32, year: i32) -> Result<Option<Decimal>> {
    Ok(monthly_budget(conn, month, year)?.map(|b| b.amount))
}

pub fn add_income(
    conn: &Connection,
    title: &str,
    amount: Decimal,
    month: u32,
    year: i32,
) -> Result<i64> {
    check_month(month)?;
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidInput("income title must not be empty".into()));
    }
    if amount.is_zero() {
        return Err(Error::InvalidInput("income amount must not be zero".into()));
    }
    conn.execute(
        "INSERT INTO MonthlyIncomes(Title, Amount, Month, Year) VALUES (?1, ?2, ?3, ?4)",
        params![title, to_real(amount)?, month, year],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, title, amount = %amount, month, year, "income added");
    Ok(id)
}

pub fn list_incomes(conn: &Connection, month: u32, year: i32) -> Result<Vec<MonthlyIncome>> {
    check_month(month)?;
    let mut stmt = conn.prepare(
        "SELECT Id, Title, Amount, Month, Year FROM MonthlyIncomes
         WHERE Month = ?1 AND Year = ?2 ORDER BY Id",
    )?;
    let mut rows = stmt.query(params![month, year])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(MonthlyIncome {
            id: r.get(0)?,
            title: r.get(1)?,
            amount: from_real(r.get(2)?)?,
            month: r.get(3)?,
            year: r.get(4)?,
        });
    }
    Ok(data)
}

/// Zero when nothing was recorded.
pub fn total_monthly_income(conn: &Connection, month: u32, year: i32) -> Result<Decimal> {
    Ok(list_incomes(conn, month, year)?
        .iter()
        .map(|i| i.amount)
        .sum())
}

/// The inputs and result of a month's balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub year_month: YearMonth,
    pub budget: Decimal,
    pub income: Decimal,
    pub operations: Decimal,
    pub balance: Decimal,
}

/// Budget (default 0) + income + signed sum of the operations visible that month.
pub fn month_summary(conn: &Connection, year_month: YearMonth) -> Result<MonthSummary> {
    let (year, month) = (year_month.year(), year_month.month());
    let budget = get_monthly_budget(conn, month, year)?.unwrap_or(Decimal::ZERO);
    let income = total_monthly_income(conn, month, year)?;
    let operations: Decimal = visible_for_month(&list_operations(conn)?, year, month)
        .iter()
        .map(|op| op.amount)
        .sum();
    let balance = budget + income + operations;
    tracing::debug!(%year_month, %budget, %income, %operations, %balance, "month summary");
    Ok(MonthSummary {
        year_month,
        budget,
        income,
        operations,
        balance,
    })
}

pub fn compute_balance(conn: &Connection, year: i32, month: u32) -> Result<Decimal> {
    Ok(month_summary(conn, YearMonth::new(year, month)?)?.balance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(id: i64, date: (i32, u32, u32), amount: &str, recurring: bool) -> FinancialOperation {
        FinancialOperation {
            id,
            title: format!("op{}", id),
            amount: amount.parse().unwrap(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category: "Other".into(),
            recurring,
        }
    }

    #[test]
    fn recurring_operations_show_every_month() {
        let ops = vec![op(1, (2025, 1, 12), "-10", false), op(2, (2025, 1, 12), "-20", true)];
        let march = visible_for_month(&ops, 2025, 3);
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].id, 2);
        assert_eq!(visible_for_month(&ops, 2025, 1).len(), 2);
        assert_eq!(visible_for_month(&ops, 1990, 6).len(), 1);
    }

    #[test]
    fn same_month_other_year_is_hidden() {
        let ops = vec![op(1, (2024, 3, 1), "-10", false)];
        assert!(visible_for_month(&ops, 2025, 3).is_empty());
    }

    #[test]
    fn day_filter_uses_day_of_month() {
        let ops = vec![
            op(1, (2025, 3, 4), "-10", false),
            op(2, (2025, 1, 4), "-20", true),
            op(3, (2025, 3, 5), "-30", false),
        ];
        let ids: Vec<i64> = visible_on_day(&ops, 4).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn validation_trims_and_rejects() {
        let base = NewOperation {
            title: "  Rent ".into(),
            amount: Decimal::new(-80000, 2),
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            category: " Housing".into(),
            recurring: true,
        };
        let ok = validate(&base).unwrap();
        assert_eq!(ok.title, "Rent");
        assert_eq!(ok.category, "Housing");

        let mut bad = base.clone();
        bad.title = "   ".into();
        assert!(validate(&bad).unwrap_err().is_invalid_input());
        let mut bad = base.clone();
        bad.category = String::new();
        assert!(validate(&bad).unwrap_err().is_invalid_input());
        let mut bad = base;
        bad.amount = Decimal::ZERO;
        assert!(validate(&bad).unwrap_err().is_invalid_input());
    }

    #[test]
    fn stored_dates_accept_datetime_text() {
        assert_eq!(
            parse_stored_date("2025-01-12 00:00:00").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 12).unwrap()
        );
        assert_eq!(
            parse_stored_date("2025-01-12T08:30:00").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 12).unwrap()
        );
        assert!(matches!(parse_stored_date("12/01/2025"), Err(Error::Corrupt(_))));
    }

    #[test]
    fn stored_dates_keep_signed_years() {
        for date in [
            NaiveDate::from_ymd_opt(10000, 3, 4).unwrap(),
            NaiveDate::from_ymd_opt(-1, 1, 1).unwrap(),
        ] {
            assert_eq!(parse_stored_date(&date.to_string()).unwrap(), date);
        }
        assert_eq!(
            parse_stored_date("-0001-01-01 00:00:00").unwrap(),
            NaiveDate::from_ymd_opt(-1, 1, 1).unwrap()
        );
    }
}
