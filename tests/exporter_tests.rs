// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use subtrack::models::NewOperation;
use subtrack::{cli, commands::operations, db, store};
use tempfile::tempdir;

fn seeded() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    for (title, amount, date, recurring) in [
        ("Corner Shop", "-12.34", "2025-01-02", false),
        ("Netflix", "-9.99", "2024-12-20", true),
    ] {
        store::add_operation(
            &conn,
            &NewOperation {
                title: title.into(),
                amount: Decimal::from_str_exact(amount).unwrap(),
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                category: "Food".into(),
                recurring,
            },
        )
        .unwrap();
    }
    conn
}

fn run_export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "subtrack", "op", "export", "--format", format, "--out", out,
    ]);
    let Some(("op", op_m)) = matches.subcommand() else {
        panic!("no op subcommand");
    };
    operations::handle(conn, op_m)
}

#[test]
fn export_json_in_date_order() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    run_export(&conn, "json", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": 2,
                "date": "2024-12-20",
                "title": "Netflix",
                "amount": "-9.99",
                "category": "Food",
                "recurring": true
            },
            {
                "id": 1,
                "date": "2025-01-02",
                "title": "Corner Shop",
                "amount": "-12.34",
                "category": "Food",
                "recurring": false
            }
        ])
    );
}

#[test]
fn export_csv_has_header_and_rows() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    run_export(&conn, "CSV", &out_path.to_string_lossy()).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "date", "title", "amount", "category", "recurring"]
    );
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[1][2], "Corner Shop");
    assert_eq!(&records[1][3], "-12.34");
}

#[test]
fn export_rejects_unknown_format() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.xml");
    assert!(run_export(&conn, "xml", &out_path.to_string_lossy()).is_err());
    assert!(!out_path.exists());
}
