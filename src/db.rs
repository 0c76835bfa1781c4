// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.subtrack", "SubTrack", "subtrack"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("subtrack.sqlite"))
}

pub fn open_at(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS Settings(
        Key TEXT PRIMARY KEY,
        Value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS FinancialOperations(
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        Title TEXT NOT NULL,
        Amount REAL NOT NULL,
        Date TEXT NOT NULL,
        Category TEXT,
        IsRecurrent INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_operations_date ON FinancialOperations(Date);

    CREATE TABLE IF NOT EXISTS MonthlyBudgets(
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        Month INTEGER NOT NULL,
        Year INTEGER NOT NULL,
        Budget REAL NOT NULL,
        UNIQUE(Month, Year)
    );

    CREATE TABLE IF NOT EXISTS MonthlyIncomes(
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        Title TEXT NOT NULL,
        Amount REAL NOT NULL,
        Month INTEGER NOT NULL,
        Year INTEGER NOT NULL
    );
    "#,
    )
}
