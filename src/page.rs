// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The calendar page: cursor, visible operations and balance kept in sync.
//!
//! Every mutation reloads the derived state and notifies subscribers
//! synchronously, in subscription order.

use crate::calendar::{CalendarCursor, Locale, MonthGrid};
use crate::error::Result;
use crate::models::{FinancialOperation, NewOperation};
use crate::store::{self, MonthSummary};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    CursorChanged(CalendarCursor),
    OperationsChanged { visible: usize },
    BalanceChanged(Decimal),
}

type Listener<'a> = Box<dyn FnMut(&PageEvent) + 'a>;

pub struct CalendarPage<'c> {
    conn: &'c Connection,
    cursor: CalendarCursor,
    operations: Vec<FinancialOperation>,
    summary: MonthSummary,
    listeners: Vec<Listener<'c>>,
}

impl<'c> CalendarPage<'c> {
    pub fn open(conn: &'c Connection, cursor: CalendarCursor) -> Result<Self> {
        let (operations, summary) = Self::load(conn, &cursor)?;
        Ok(Self {
            conn,
            cursor,
            operations,
            summary,
            listeners: Vec::new(),
        })
    }

    pub fn subscribe(&mut self, f: impl FnMut(&PageEvent) + 'c) {
        self.listeners.push(Box::new(f));
    }

    pub fn cursor(&self) -> &CalendarCursor {
        &self.cursor
    }

    /// Operations of the displayed month, narrowed to the selected day if any.
    pub fn operations(&self) -> Vec<FinancialOperation> {
        match self.cursor.selected_day() {
            Some(day) => store::visible_on_day(&self.operations, day),
            None => self.operations.clone(),
        }
    }

    pub fn balance(&self) -> Decimal {
        self.summary.balance
    }

    pub fn summary(&self) -> &MonthSummary {
        &self.summary
    }

    pub fn grid(&self, today: NaiveDate, locale: Locale) -> Result<MonthGrid> {
        MonthGrid::build(&self.cursor, today, locale)
    }

    pub fn next_month(&mut self) -> Result<()> {
        self.cursor.advance(1);
        self.cursor_changed()
    }

    pub fn previous_month(&mut self) -> Result<()> {
        self.cursor.advance(-1);
        self.cursor_changed()
    }

    pub fn set_year_month(&mut self, year: i32, month: u32) -> Result<()> {
        self.cursor.set_year_month(year, month)?;
        self.cursor_changed()
    }

    /// Selection does not change the month, so nothing is reloaded.
    pub fn toggle_day(&mut self, day: u32) -> Result<()> {
        self.cursor.toggle_day(day)?;
        let cursor = self.cursor;
        self.emit(PageEvent::CursorChanged(cursor));
        let visible = self.operations().len();
        self.emit(PageEvent::OperationsChanged { visible });
        Ok(())
    }

    /// Invalid payloads leave the page untouched.
    pub fn add_operation(&mut self, op: &NewOperation) -> Result<i64> {
        let id = store::add_operation(self.conn, op)?;
        self.reload()?;
        Ok(id)
    }

    pub fn delete_operation(&mut self, id: i64) -> Result<bool> {
        let removed = store::delete_operation(self.conn, id)?;
        if removed {
            self.reload()?;
        }
        Ok(removed)
    }

    pub fn reload(&mut self) -> Result<()> {
        let (operations, summary) = Self::load(self.conn, &self.cursor)?;
        let balance_changed = summary.balance != self.summary.balance;
        self.operations = operations;
        self.summary = summary;
        let visible = self.operations().len();
        self.emit(PageEvent::OperationsChanged { visible });
        if balance_changed {
            let balance = self.summary.balance;
            self.emit(PageEvent::BalanceChanged(balance));
        }
        Ok(())
    }

    fn cursor_changed(&mut self) -> Result<()> {
        let cursor = self.cursor;
        self.emit(PageEvent::CursorChanged(cursor));
        self.reload()
    }

    fn load(
        conn: &Connection,
        cursor: &CalendarCursor,
    ) -> Result<(Vec<FinancialOperation>, MonthSummary)> {
        let ym = cursor.year_month();
        let mut operations =
            store::visible_for_month(&store::list_operations(conn)?, ym.year(), ym.month());
        operations.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        let summary = store::month_summary(conn, ym)?;
        Ok((operations, summary))
    }

    fn emit(&mut self, event: PageEvent) {
        tracing::debug!(?event, "page event");
        for l in self.listeners.iter_mut() {
            l(&event);
        }
    }
}
