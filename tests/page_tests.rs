// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::rc::Rc;
use subtrack::calendar::{CalendarCursor, Locale, YearMonth};
use subtrack::commands::calendar::{render, target_month};
use subtrack::models::NewOperation;
use subtrack::page::{CalendarPage, PageEvent};
use subtrack::{db, store};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn op(title: &str, amount: &str, date: (i32, u32, u32), recurring: bool) -> NewOperation {
    NewOperation {
        title: title.into(),
        amount: Decimal::from_str_exact(amount).unwrap(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        category: "Other".into(),
        recurring,
    }
}

fn cursor(y: i32, m: u32) -> CalendarCursor {
    CalendarCursor::new(YearMonth::new(y, m).unwrap())
}

#[test]
fn navigation_reloads_visible_operations() {
    let conn = setup();
    store::add_operation(&conn, &op("January only", "-10", (2025, 1, 12), false)).unwrap();
    store::add_operation(&conn, &op("Rent", "-700", (2025, 1, 1), true)).unwrap();

    let mut page = CalendarPage::open(&conn, cursor(2025, 1)).unwrap();
    assert_eq!(page.operations().len(), 2);
    assert_eq!(page.balance(), Decimal::from(-710));

    page.next_month().unwrap();
    page.next_month().unwrap();
    assert_eq!(page.cursor().month(), 3);
    let titles: Vec<String> = page.operations().into_iter().map(|o| o.title).collect();
    assert_eq!(titles, vec!["Rent".to_string()]);
    assert_eq!(page.balance(), Decimal::from(-700));

    page.set_year_month(2024, 12).unwrap();
    assert_eq!(page.operations().len(), 1);
}

#[test]
fn subscribers_see_every_change_in_order() {
    let conn = setup();
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut page = CalendarPage::open(&conn, cursor(2025, 1)).unwrap();
    let sink = Rc::clone(&events);
    page.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    page.previous_month().unwrap();
    {
        let seen = events.borrow();
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], PageEvent::CursorChanged(c) if c.year() == 2024 && c.month() == 12));
        assert_eq!(seen[1], PageEvent::OperationsChanged { visible: 0 });
    }
    events.borrow_mut().clear();

    let id = page.add_operation(&op("Coffee", "-3.50", (2024, 12, 24), false)).unwrap();
    {
        let seen = events.borrow();
        assert_eq!(
            *seen,
            vec![
                PageEvent::OperationsChanged { visible: 1 },
                PageEvent::BalanceChanged(Decimal::from_str_exact("-3.50").unwrap()),
            ]
        );
    }
    events.borrow_mut().clear();

    assert!(page.delete_operation(id).unwrap());
    assert_eq!(events.borrow().len(), 2);
    assert_eq!(page.balance(), Decimal::ZERO);
}

#[test]
fn rejected_add_leaves_page_untouched() {
    let conn = setup();
    let events = Rc::new(RefCell::new(0usize));
    let mut page = CalendarPage::open(&conn, cursor(2025, 1)).unwrap();
    let sink = Rc::clone(&events);
    page.subscribe(move |_| *sink.borrow_mut() += 1);

    let err = page.add_operation(&op("", "-3", (2025, 1, 2), false)).unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(*events.borrow(), 0);
    assert!(page.operations().is_empty());
}

#[test]
fn selecting_a_day_narrows_the_list() {
    let conn = setup();
    store::add_operation(&conn, &op("Fifth", "-5", (2025, 2, 5), false)).unwrap();
    store::add_operation(&conn, &op("Sixth", "-6", (2025, 2, 6), false)).unwrap();
    let mut page = CalendarPage::open(&conn, cursor(2025, 2)).unwrap();

    page.toggle_day(6).unwrap();
    let ops = page.operations();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].title, "Sixth");
    // balance still covers the whole month
    assert_eq!(page.balance(), Decimal::from(-11));

    page.toggle_day(6).unwrap();
    assert_eq!(page.operations().len(), 2);
    assert!(page.toggle_day(29).is_err());
}

#[test]
fn render_shows_grid_operations_and_balance() {
    let conn = setup();
    store::set_monthly_budget(&conn, 1, 2025, Decimal::from(100)).unwrap();
    store::add_operation(&conn, &op("Books", "-25", (2025, 1, 15), false)).unwrap();
    let page = CalendarPage::open(&conn, cursor(2025, 1)).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

    let text = render(&page, today, Locale::Fr).unwrap();
    assert!(text.starts_with("Janvier 2025\n"));
    assert!(text.contains("Lun"));
    assert!(text.contains("*15"));
    assert!(text.contains("Books"));
    assert!(text.contains("-25.00"));
    assert!(text.ends_with("Balance: 75.00\n"));
}

#[test]
fn prev_and_next_jump_in_one_step() {
    let start = YearMonth::new(2025, 1).unwrap();
    assert_eq!(
        target_month(start, 2, 0).unwrap(),
        YearMonth::new(2024, 11).unwrap()
    );
    assert_eq!(
        target_month(start, 1, 14).unwrap(),
        YearMonth::new(2026, 2).unwrap()
    );
    assert_eq!(target_month(start, 3, 3).unwrap(), start);
    assert!(matches!(
        target_month(start, 0, 4_000_000_000),
        Err(subtrack::error::Error::Range(_))
    ));
}
