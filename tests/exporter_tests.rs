// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;

use pocketledger::commands::exporter;
use pocketledger::export::{self, Backup, DetailedReport};
use pocketledger::utils::parse_datetime;
use pocketledger::{cli, Category, Currency, ExpenseRecord, LedgerStore, MemoryStore, Settings};
use tempfile::tempdir;

fn sample() -> Vec<ExpenseRecord> {
    vec![
        ExpenseRecord::with_id(
            "b",
            "45.00".parse().unwrap(),
            Category::Transportation,
            "Uber, airport",
            parse_datetime("2025-01-04T09:15:00").unwrap(),
            Some("Mumbai".into()),
        )
        .unwrap(),
        ExpenseRecord::with_id(
            "a",
            "25.50".parse().unwrap(),
            Category::FoodDining,
            "Lunch",
            parse_datetime("2025-01-05").unwrap(),
            None,
        )
        .unwrap(),
    ]
}

fn run(store: &MemoryStore, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["pocketledger", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("export", m)) => exporter::handle(store, m),
        _ => panic!("no export subcommand"),
    }
}

#[test]
fn csv_export_writes_header_and_sorted_rows() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    let store = MemoryStore::with_records(sample());
    run(&store, &["transactions", "--out", out.to_str().unwrap()]).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Date,Description,Category,Amount,Location");
    assert_eq!(lines[1], "2025-01-05T00:00:00,Lunch,Food & Dining,25.50,");
    assert_eq!(lines[2], "2025-01-04T09:15:00,\"Uber, airport\",Transportation,45.00,Mumbai");
    assert_eq!(lines.len(), 3);
}

#[test]
fn csv_export_honours_filters() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("food.csv");
    let store = MemoryStore::with_records(sample());
    run(
        &store,
        &["transactions", "--category", "Food & Dining", "--out", out.to_str().unwrap()],
    )
    .unwrap();
    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("Lunch"));
}

#[test]
fn json_export_round_trips_records() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    let store = MemoryStore::with_records(sample());
    run(
        &store,
        &["transactions", "--format", "JSON", "--sort", "amount-desc", "--out", out.to_str().unwrap()],
    )
    .unwrap();
    let parsed: Vec<ExpenseRecord> = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(parsed, sample());
}

#[test]
fn unknown_format_is_rejected_before_writing() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.xml");
    let store = MemoryStore::with_records(sample());
    assert!(run(&store, &["transactions", "--format", "xml", "--out", out.to_str().unwrap()]).is_err());
    assert!(!out.exists());
}

#[test]
fn backup_file_restores_records_and_settings() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("backup.json");
    let mut store = MemoryStore::with_records(sample());
    let settings = Settings {
        currency: Currency::GBP,
        ..Settings::default()
    };
    store.save_settings(&settings).unwrap();
    run(&store, &["backup", "--out", out.to_str().unwrap()]).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert!(json.get("exportDate").is_some());
    assert_eq!(json["settings"]["currency"], "GBP");
    assert_eq!(json["expenses"][0]["amount"], "45.00");

    let backup = Backup::read(fs::File::open(&out).unwrap()).unwrap();
    assert_eq!(backup.expenses, sample());
    assert_eq!(backup.settings, settings);
}

#[test]
fn backup_with_duplicate_ids_is_rejected() {
    let mut records = sample();
    records[1].id = "b".into();
    let mut buf = Vec::new();
    Backup::new(records, Settings::default()).write(&mut buf).unwrap();
    assert!(Backup::read(buf.as_slice()).is_err());
}

#[test]
fn detailed_report_carries_analytics() {
    let report = DetailedReport::build(sample(), Settings::default());
    let mut buf = Vec::new();
    report.write(&mut buf).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(json["analytics"]["totalExpenses"], "70.50");
    assert_eq!(json["analytics"]["transactionCount"], 2);
    assert_eq!(json["expenses"].as_array().unwrap().len(), 2);
    assert!(json.get("exportTimestamp").is_some());
}

#[test]
fn default_file_names() {
    let day = chrono::NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
    assert_eq!(export::csv_file_name(day), "expenses-2025-02-03.csv");
    assert_eq!(export::backup_file_name(day), "expense-tracker-backup-2025-02-03.json");
    assert_eq!(export::report_file_name(day), "admin-detailed-report-2025-02-03.json");
}
