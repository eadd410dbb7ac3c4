// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! File formats for handing ledger data to the outside world.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::engine::{self, LedgerSummary};
use crate::models::{ExpenseRecord, Settings};
use crate::utils::format_datetime;

pub const CSV_HEADER: [&str; 5] = ["Date", "Description", "Category", "Amount", "Location"];

/// Writes one row per record, in the order given.
pub fn write_csv<W: Write>(records: &[ExpenseRecord], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(CSV_HEADER)?;
    for r in records {
        wtr.write_record([
            format_datetime(&r.date),
            r.description.clone(),
            r.category.label().to_string(),
            r.amount.to_string(),
            r.location.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize, W: Write>(value: &T, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    out.flush()?;
    Ok(())
}

/// Complete snapshot of the user's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub settings: Settings,
    pub export_date: DateTime<Local>,
}

impl Backup {
    pub fn new(expenses: Vec<ExpenseRecord>, settings: Settings) -> Self {
        Self {
            expenses,
            settings,
            export_date: Local::now(),
        }
    }

    pub fn write<W: Write>(&self, out: W) -> Result<()> {
        write_json(self, out)
    }

    /// Reads a backup and checks the records it carries.
    pub fn read<R: Read>(input: R) -> Result<Self> {
        let backup: Backup = serde_json::from_reader(input).context("Malformed backup file")?;
        engine::validate(&backup.expenses)?;
        backup.settings.validate()?;
        Ok(backup)
    }
}

/// Backup plus the analytics figures, for offline inspection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedReport {
    pub settings: Settings,
    pub expenses: Vec<ExpenseRecord>,
    pub analytics: LedgerSummary,
    pub export_timestamp: DateTime<Local>,
}

impl DetailedReport {
    pub fn build(expenses: Vec<ExpenseRecord>, settings: Settings) -> Self {
        let analytics = engine::summarize(&expenses, 5);
        Self {
            settings,
            expenses,
            analytics,
            export_timestamp: Local::now(),
        }
    }

    pub fn write<W: Write>(&self, out: W) -> Result<()> {
        write_json(self, out)
    }
}

pub fn csv_file_name(day: NaiveDate) -> String {
    format!("expenses-{}.csv", day)
}

pub fn backup_file_name(day: NaiveDate) -> String {
    format!("expense-tracker-backup-{}.json", day)
}

pub fn report_file_name(day: NaiveDate) -> String {
    format!("admin-detailed-report-{}.json", day)
}
