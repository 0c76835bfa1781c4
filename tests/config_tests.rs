// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use subtrack::calendar::Locale;
use subtrack::commands::categories::known_categories;
use subtrack::models::NewOperation;
use subtrack::{cli, commands::config, db, store, utils};
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn locale_defaults_to_english_and_persists() {
    let conn = setup();
    assert_eq!(utils::get_locale(&conn).unwrap(), Locale::En);

    let matches = cli::build_cli().get_matches_from([
        "subtrack", "config", "set", "--key", "locale", "--value", " FR ",
    ]);
    let Some(("config", c_m)) = matches.subcommand() else {
        panic!("config command not parsed");
    };
    config::handle(&conn, c_m).unwrap();
    assert_eq!(utils::get_setting(&conn, "locale").unwrap().as_deref(), Some("fr"));
    assert_eq!(utils::get_locale(&conn).unwrap(), Locale::Fr);
}

#[test]
fn unknown_settings_are_rejected() {
    let conn = setup();
    assert!(utils::set_setting(&conn, "currency", "EUR").is_err());
    assert!(utils::set_setting(&conn, "locale", "de").is_err());
    assert_eq!(utils::get_setting(&conn, "locale").unwrap(), None);
}

#[test]
fn categories_merge_defaults_with_used_labels() {
    let conn = setup();
    store::add_operation(
        &conn,
        &NewOperation {
            title: "Vet".into(),
            amount: Decimal::from(-60),
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            category: "Pets".into(),
            recurring: false,
        },
    )
    .unwrap();
    let cats = known_categories(&conn).unwrap();
    assert_eq!(cats.len(), 6);
    assert_eq!(cats[0], "Food");
    assert_eq!(cats.last().map(String::as_str), Some("Pets"));
}

#[test]
fn open_at_creates_schema_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("subtrack.sqlite");
    {
        let conn = db::open_at(&path).unwrap();
        store::set_monthly_budget(&conn, 1, 2026, Decimal::from(10)).unwrap();
    }
    let conn = db::open_at(&path).unwrap();
    assert_eq!(
        store::get_monthly_budget(&conn, 1, 2026).unwrap(),
        Some(Decimal::from(10))
    );
}
