// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{filter_spec, required};
use crate::engine;
use crate::models::{format_amount, Category, ExpenseRecord};
use crate::store::LedgerStore;
use crate::utils::{maybe_print_json, parse_datetime, parse_decimal, pretty_table, today};

pub fn handle(store: &mut dyn LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Builds the record described by `expense add` flags.
pub fn record_from_args(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<ExpenseRecord> {
    let amount = parse_decimal(required(sub, "amount")?)?;
    let description = required(sub, "description")?.trim().to_string();
    let category = match sub.get_one::<String>("category") {
        Some(c) => c.parse::<Category>()?,
        None => store.load_settings()?.default_category,
    };
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_datetime(d)?,
        None => today().and_time(chrono::NaiveTime::MIN),
    };
    let location = sub.get_one::<String>("location").map(|s| s.trim().to_string());
    Ok(ExpenseRecord::new(amount, category, description, date, location)?)
}

fn add(store: &mut dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let record = record_from_args(store, sub)?;
    let currency = store.load_settings()?.currency;
    let line = format!(
        "Added expense: {} - {} ({}, {})",
        record.description,
        format_amount(record.amount, currency),
        record.category,
        record.day()
    );
    store.add_expense(record)?;
    println!("{}", line);
    Ok(())
}

fn remove(store: &mut dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    if store.delete_expense(id)? {
        println!("Removed expense {}", id);
    } else {
        anyhow::bail!("Expense '{}' not found", id);
    }
    Ok(())
}

fn list(store: &mut dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let currency = store.load_settings()?.currency;
    let total = engine::total_amount(&data);
    let rows: Vec<Vec<String>> = data.iter().map(ExpenseRow::from).map(ExpenseRow::cells).collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Description", "Category", "Amount", "Location"],
            rows,
        )
    );
    println!(
        "{} transactions, total {}, average {}",
        data.len(),
        format_amount(total, currency),
        format_amount(engine::average_per_record(&data), currency)
    );
    Ok(())
}

/// Filtered, sorted and optionally truncated record list for `expense list`.
pub fn query_rows(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRecord>> {
    let spec = filter_spec(sub)?;
    let records = store.load_expenses()?;
    let mut out = engine::filter_and_sort(&records, &spec);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        out.truncate(*limit);
    }
    Ok(out)
}

/// Table-ready view of a record.
pub struct ExpenseRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub location: String,
}

impl ExpenseRow {
    fn cells(self) -> Vec<String> {
        vec![
            self.id,
            self.date,
            self.description,
            self.category,
            self.amount,
            self.location,
        ]
    }
}

impl From<&ExpenseRecord> for ExpenseRow {
    fn from(r: &ExpenseRecord) -> Self {
        Self {
            id: r.id.clone(),
            date: r.day().to_string(),
            description: r.description.clone(),
            category: r.category.label().to_string(),
            amount: format!("{:.2}", r.amount),
            location: r.location.clone().unwrap_or_default(),
        }
    }
}
