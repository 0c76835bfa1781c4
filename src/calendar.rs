// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month grid arithmetic and the calendar cursor.
//!
//! The grid is Monday-first with 7 columns. Row 0 holds the weekday headers,
//! day numbers start on row 1.

use crate::error::{Error, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DAYS_PER_WEEK: u32 = 7;

/// A validated (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::Range(format!("month {} not in 1..=12", month)));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(Error::Range(format!("year {} is not representable", year)));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // validated in `new`
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() {
                    29
                } else {
                    28
                }
            }
        }
    }

    /// Weekday of day 1, Monday = 0 ... Sunday = 6.
    pub fn weekday_offset(&self) -> u32 {
        let raw = self.first_day().weekday().num_days_from_sunday();
        if raw == 0 { 6 } else { raw - 1 }
    }

    /// Grid rows including the header row.
    pub fn row_count(&self) -> u32 {
        (self.days_in_month() + self.weekday_offset()).div_ceil(DAYS_PER_WEEK) + 1
    }

    /// Grid cell of a zero-based day index as `(row, column)`.
    pub fn place_day(&self, day_index: u32) -> Result<(u32, u32)> {
        if day_index >= self.days_in_month() {
            return Err(Error::Range(format!(
                "day index {} outside {} ({} days)",
                day_index,
                self,
                self.days_in_month()
            )));
        }
        let slot = day_index + self.weekday_offset();
        Ok((slot / DAYS_PER_WEEK + 1, slot % DAYS_PER_WEEK))
    }

    /// Shifts by `delta` months, rolling the year over. `None` past chrono's range.
    pub fn shifted(&self, delta: i32) -> Option<Self> {
        let total = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(delta);
        let year = i32::try_from(total.div_euclid(12)).ok()?;
        let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
        Self::new(year, month).ok()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (y, m) = s
            .rsplit_once('-')
            .ok_or_else(|| Error::InvalidInput(format!("month '{}', expected YYYY-MM", s)))?;
        let year: i32 = y
            .parse()
            .map_err(|_| Error::InvalidInput(format!("year '{}' in '{}'", y, s)))?;
        let month: u32 = m
            .parse()
            .map_err(|_| Error::InvalidInput(format!("month '{}' in '{}'", m, s)))?;
        Self::new(year, month)
    }
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    Ok(YearMonth::new(year, month)?.days_in_month())
}

pub fn weekday_offset(year: i32, month: u32) -> Result<u32> {
    Ok(YearMonth::new(year, month)?.weekday_offset())
}

pub fn row_count(year: i32, month: u32) -> Result<u32> {
    Ok(YearMonth::new(year, month)?.row_count())
}

pub fn place_day(day_index: u32, year: i32, month: u32) -> Result<(u32, u32)> {
    YearMonth::new(year, month)?.place_day(day_index)
}

/// Display language for month and weekday names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTHS_FR: [&str; 12] = [
    "Janvier", "Février", "Mars", "Avril", "Mai", "Juin", "Juillet", "Août", "Septembre",
    "Octobre", "Novembre", "Décembre",
];
const WEEKDAYS_EN: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const WEEKDAYS_FR: [&str; 7] = ["Lun", "Mar", "Mer", "Jeu", "Ven", "Sam", "Dim"];

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    fn months(&self) -> &'static [&'static str; 12] {
        match self {
            Locale::En => &MONTHS_EN,
            Locale::Fr => &MONTHS_FR,
        }
    }

    /// Short weekday names, Monday first.
    pub fn weekday_headers(&self) -> [&'static str; 7] {
        match self {
            Locale::En => WEEKDAYS_EN,
            Locale::Fr => WEEKDAYS_FR,
        }
    }

    pub fn month_name(&self, month: u32) -> Result<&'static str> {
        usize::try_from(month)
            .ok()
            .and_then(|m| m.checked_sub(1))
            .and_then(|i| self.months().get(i).copied())
            .ok_or_else(|| Error::Range(format!("month {} not in 1..=12", month)))
    }

    /// Inverse of [`Locale::month_name`], case-insensitive.
    pub fn month_number(&self, name: &str) -> Result<u32> {
        let wanted = name.trim().to_lowercase();
        self.months()
            .iter()
            .position(|m| m.to_lowercase() == wanted)
            .map(|i| i as u32 + 1)
            .ok_or_else(|| Error::InvalidInput(format!("unknown month name '{}'", name.trim())))
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            other => Err(Error::InvalidInput(format!(
                "unknown locale '{}' (use en|fr)",
                other
            ))),
        }
    }
}

/// Current year/month selection of the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCursor {
    year_month: YearMonth,
    selected_day: Option<u32>,
}

impl CalendarCursor {
    pub fn new(year_month: YearMonth) -> Self {
        Self {
            year_month,
            selected_day: None,
        }
    }

    pub fn today() -> Self {
        Self::new(YearMonth::of(Local::now().date_naive()))
    }

    pub fn year_month(&self) -> YearMonth {
        self.year_month
    }

    pub fn year(&self) -> i32 {
        self.year_month.year
    }

    pub fn month(&self) -> u32 {
        self.year_month.month
    }

    pub fn selected_day(&self) -> Option<u32> {
        self.selected_day
    }

    /// Direct assignment. Clears the selection when the month actually changes.
    pub fn set_year_month(&mut self, year: i32, month: u32) -> Result<()> {
        let next = YearMonth::new(year, month)?;
        if next != self.year_month {
            self.year_month = next;
            self.selected_day = None;
        }
        Ok(())
    }

    /// Moves by `delta` months. Navigation past chrono's range leaves the cursor as is.
    pub fn advance(&mut self, delta: i32) {
        match self.year_month.shifted(delta) {
            Some(next) => {
                self.year_month = next;
                self.selected_day = None;
            }
            None => tracing::warn!(from = %self.year_month, delta, "month navigation out of range"),
        }
    }

    pub fn toggle_day(&mut self, day: u32) -> Result<()> {
        if day == 0 || day > self.year_month.days_in_month() {
            return Err(Error::Range(format!(
                "day {} outside {}",
                day, self.year_month
            )));
        }
        self.selected_day = if self.selected_day == Some(day) {
            None
        } else {
            Some(day)
        };
        Ok(())
    }
}

pub fn advance_month(mut cursor: CalendarCursor, delta: i32) -> CalendarCursor {
    cursor.advance(delta);
    cursor
}

pub fn toggle_selected_day(mut cursor: CalendarCursor, day: u32) -> Result<CalendarCursor> {
    cursor.toggle_day(day)?;
    Ok(cursor)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub row: u32,
    pub column: u32,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Everything needed to draw one month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year_month: YearMonth,
    pub title: String,
    pub rows: u32,
    pub headers: [&'static str; 7],
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn build(cursor: &CalendarCursor, today: NaiveDate, locale: Locale) -> Result<Self> {
        let ym = cursor.year_month();
        let today_in_month = ym.contains(today).then(|| today.day());
        let mut cells = Vec::with_capacity(ym.days_in_month() as usize);
        for idx in 0..ym.days_in_month() {
            let (row, column) = ym.place_day(idx)?;
            let day = idx + 1;
            cells.push(DayCell {
                day,
                row,
                column,
                is_today: today_in_month == Some(day),
                is_selected: cursor.selected_day() == Some(day),
            });
        }
        Ok(Self {
            year_month: ym,
            title: format!("{} {}", locale.month_name(ym.month())?, ym.year()),
            rows: ym.row_count(),
            headers: locale.weekday_headers(),
            cells,
        })
    }

    /// Cell labels laid out row by row, header row excluded. Empty slots are `""`.
    pub fn week_rows(&self) -> Vec<Vec<String>> {
        let body = self.rows.saturating_sub(1) as usize;
        let mut out = vec![vec![String::new(); DAYS_PER_WEEK as usize]; body];
        for c in &self.cells {
            let label = match (c.is_selected, c.is_today) {
                (true, _) => format!("[{}]", c.day),
                (false, true) => format!("*{}", c.day),
                _ => c.day.to_string(),
            };
            if let Some(slot) = out
                .get_mut(c.row as usize - 1)
                .and_then(|r| r.get_mut(c.column as usize))
            {
                *slot = label;
            }
        }
        out
    }
}
