// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::models::{Category, Currency, ExpenseRecord, Settings};
use crate::store::LedgerStore;
use crate::utils::{format_datetime, parse_datetime};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pocketledger", "pocketledger"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("pocketledger.sqlite"))
}

/// Opens the store at `path`, or at the platform data dir when `None`.
pub fn open_or_init(path: Option<&Path>) -> Result<SqliteStore> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => db_path()?,
    };
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    tracing::info!(path = %path.display(), "opened ledger database");
    Ok(SqliteStore::new(conn)?)
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- seq orders the list: highest seq is the front
    CREATE TABLE IF NOT EXISTS expenses(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT NOT NULL,
        date TEXT NOT NULL,
        location TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
    "#,
    )
}

/// SQLite-backed store. Settings live in a key/value table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?)
    }
}

fn row_to_record(
    id: String,
    amount: String,
    category: String,
    description: String,
    date: String,
    location: Option<String>,
) -> Result<ExpenseRecord, StoreError> {
    let amount = amount.parse::<Decimal>().map_err(|_| StoreError::Corrupt {
        column: "amount",
        value: amount.clone(),
    })?;
    let date = parse_datetime(&date).map_err(|_| StoreError::Corrupt {
        column: "date",
        value: date.clone(),
    })?;
    Ok(ExpenseRecord {
        id,
        amount,
        category: Category::from_label_lossy(&category),
        description,
        date,
        location,
    })
}

impl LedgerStore for SqliteStore {
    fn load_expenses(&self) -> Result<Vec<ExpenseRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, category, description, date, location
             FROM expenses ORDER BY seq DESC",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, Option<String>>(5)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, amount, category, description, date, location) = row?;
            out.push(row_to_record(id, amount, category, description, date, location)?);
        }
        crate::engine::validate(&out)?;
        tracing::debug!(count = out.len(), "loaded expenses");
        Ok(out)
    }

    fn save_expenses(&mut self, records: &[ExpenseRecord]) -> Result<(), StoreError> {
        crate::engine::validate(records)?;
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM expenses", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO expenses(id, amount, category, description, date, location)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            // back to front, so the first record gets the highest seq
            for r in records.iter().rev() {
                stmt.execute(params![
                    r.id,
                    r.amount.to_string(),
                    r.category.label(),
                    r.description,
                    format_datetime(&r.date),
                    r.location,
                ])?;
            }
        }
        tx.commit()?;
        tracing::info!(count = records.len(), "saved expenses");
        Ok(())
    }

    fn add_expense(&mut self, record: ExpenseRecord) -> Result<(), StoreError> {
        record.validate()?;
        self.conn
            .execute(
                "INSERT INTO expenses(id, amount, category, description, date, location)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.id,
                    record.amount.to_string(),
                    record.category.label(),
                    record.description,
                    format_datetime(&record.date),
                    record.location,
                ],
            )
            .map_err(|err| match err {
                rusqlite::Error::SqliteFailure(e, _)
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    StoreError::Ledger(crate::error::LedgerError::invalid_record(
                        "id",
                        format!("duplicate id '{}'", record.id),
                    ))
                }
                other => StoreError::Sqlite(other),
            })?;
        tracing::info!(id = %record.id, "added expense");
        Ok(())
    }

    fn delete_expense(&mut self, id: &str) -> Result<bool, StoreError> {
        let n = self
            .conn
            .execute("DELETE FROM expenses WHERE id=?1", params![id])?;
        tracing::info!(id, removed = n > 0, "delete expense");
        Ok(n > 0)
    }

    fn load_settings(&self) -> Result<Settings, StoreError> {
        let mut settings = Settings::default();
        if let Some(v) = self.setting("currency")? {
            settings.currency = v.parse::<Currency>().unwrap_or_else(|_| {
                tracing::warn!(value = %v, "unknown stored currency, using INR");
                Currency::INR
            });
        }
        if let Some(v) = self.setting("monthly_budget")? {
            settings.monthly_budget = v.parse::<Decimal>().map_err(|_| StoreError::Corrupt {
                column: "monthly_budget",
                value: v.clone(),
            })?;
        }
        if let Some(v) = self.setting("default_category")? {
            settings.default_category = Category::from_label_lossy(&v);
        }
        if let Some(v) = self.setting("notifications")? {
            settings.notifications = v == "true";
        }
        Ok(settings)
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        settings.validate()?;
        let tx = self.conn.transaction()?;
        for (key, value) in [
            ("currency", settings.currency.code().to_string()),
            ("monthly_budget", settings.monthly_budget.to_string()),
            ("default_category", settings.default_category.label().to_string()),
            ("notifications", settings.notifications.to_string()),
        ] {
            tx.execute(
                "INSERT INTO settings(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![key, value],
            )?;
        }
        tx.commit()?;
        tracing::info!("saved settings");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.conn
            .execute_batch("DELETE FROM expenses; DELETE FROM settings;")?;
        tracing::info!("cleared all data");
        Ok(())
    }
}
