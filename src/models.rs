// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stored expense (negative amount) or income (positive amount).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialOperation {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    pub recurring: bool,
}

/// Payload of the add-operation form, not yet validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOperation {
    pub title: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    pub recurring: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    pub month: u32,
    pub year: i32,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub month: u32,
    pub year: i32,
}

pub const DEFAULT_CATEGORIES: [&str; 5] = ["Food", "Transport", "Housing", "Entertainment", "Other"];

impl FinancialOperation {
    pub fn kind_label(&self) -> &'static str {
        recurrence_label(self.recurring)
    }
}

pub fn recurrence_label(recurring: bool) -> &'static str {
    if recurring { "Recurrent" } else { "Unique" }
}

/// Accepts `recurrent`, `unique` or `not recurrent`, any case.
pub fn parse_recurrence(s: &str) -> crate::error::Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "recurrent" => Ok(true),
        "unique" | "not recurrent" => Ok(false),
        other => Err(crate::error::Error::InvalidInput(format!(
            "expected \"recurrent\" or \"unique\", got \"{}\"",
            other
        ))),
    }
}
