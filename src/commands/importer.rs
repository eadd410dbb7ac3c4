// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use super::required;
use crate::export::Backup;
use crate::models::{Category, ExpenseRecord};
use crate::store::LedgerStore;
use crate::utils::{parse_datetime, parse_decimal};

pub fn handle(store: &mut dyn LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => import_backup(store, sub),
        Some(("csv", sub)) => import_csv(store, sub),
        _ => Ok(()),
    }
}

fn import_backup(store: &mut dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let path = required(sub, "file")?.trim();
    let f = File::open(path).with_context(|| format!("Open backup {}", path))?;
    let backup = Backup::read(BufReader::new(f))?;
    let replace = sub.get_flag("replace");

    let count = backup.expenses.len();
    if replace {
        store.save_expenses(&backup.expenses)?;
        store.save_settings(&backup.settings)?;
        println!("Restored {} expenses and settings from {}", count, path);
    } else {
        let added = merge(store, backup.expenses)?;
        println!("Merged {} of {} expenses from {}", added, count, path);
    }
    Ok(())
}

/// Reads rows in the `export transactions --format csv` layout:
/// Date, Description, Category, Amount, Location.
pub fn read_csv<R: std::io::Read>(input: R) -> Result<Vec<ExpenseRecord>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(input);
    let mut out = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = line + 2;
        let date_raw = rec.get(0).context("date missing")?.trim();
        let description = rec.get(1).context("description missing")?.trim();
        let category_raw = rec.get(2).unwrap_or("").trim();
        let amount_raw = rec.get(3).context("amount missing")?.trim();
        let location = rec
            .get(4)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        let date = parse_datetime(date_raw)
            .with_context(|| format!("Row {}: invalid date '{}'", row, date_raw))?;
        let amount = parse_decimal(amount_raw)
            .with_context(|| format!("Row {}: invalid amount '{}'", row, amount_raw))?;
        let category = if category_raw.is_empty() {
            Category::Other
        } else {
            category_raw
                .parse::<Category>()
                .with_context(|| format!("Row {}", row))?
        };
        let record = ExpenseRecord::new(amount, category, description, date, location)
            .with_context(|| format!("Row {}", row))?;
        out.push(record);
    }
    Ok(out)
}

fn import_csv(store: &mut dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let path = required(sub, "file")?.trim();
    let f = File::open(path).with_context(|| format!("Open CSV {}", path))?;
    let records = read_csv(BufReader::new(f))?;
    let count = records.len();
    let added = merge(store, records)?;
    println!("Imported {} of {} expenses from {}", added, count, path);
    Ok(())
}

/// Puts `incoming` records whose id is new in front of the stored list.
pub fn merge(store: &mut dyn LedgerStore, incoming: Vec<ExpenseRecord>) -> Result<usize> {
    let existing = store.load_expenses()?;
    let known: HashSet<&str> = existing.iter().map(|r| r.id.as_str()).collect();
    let mut fresh: Vec<ExpenseRecord> = incoming
        .into_iter()
        .filter(|r| !known.contains(r.id.as_str()))
        .collect();
    let added = fresh.len();
    if added > 0 {
        fresh.extend(existing.iter().cloned());
        store.save_expenses(&fresh)?;
    }
    tracing::info!(added, "merged imported expenses");
    Ok(added)
}
