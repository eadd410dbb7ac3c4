// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;

use pocketledger::commands::importer;
use pocketledger::export::{self, Backup};
use pocketledger::utils::parse_datetime;
use pocketledger::{cli, Category, Currency, ExpenseRecord, LedgerStore, MemoryStore, Settings};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn rec(id: &str, amount: &str, date: &str) -> ExpenseRecord {
    ExpenseRecord::with_id(
        id,
        amount.parse().unwrap(),
        Category::Other,
        format!("row {}", id),
        parse_datetime(date).unwrap(),
        None,
    )
    .unwrap()
}

fn run(store: &mut MemoryStore, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["pocketledger", "import"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("import", m)) => importer::handle(store, m),
        _ => panic!("no import subcommand"),
    }
}

#[test]
fn read_csv_parses_rows() {
    let data = "\
Date,Description,Category,Amount,Location
2025-01-05,Lunch,food & dining,25.50,
2025-01-04T08:00:00,\"Taxi, late\",,12,Pune
";
    let rows = importer::read_csv(data.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, Category::FoodDining);
    assert_eq!(rows[0].amount, "25.50".parse::<Decimal>().unwrap());
    assert_eq!(rows[0].location, None);
    assert_eq!(rows[1].description, "Taxi, late");
    assert_eq!(rows[1].category, Category::Other);
    assert_eq!(rows[1].location.as_deref(), Some("Pune"));
    assert_ne!(rows[0].id, rows[1].id);
}

#[test]
fn read_csv_reports_bad_rows() {
    let bad_amount = "Date,Description,Category,Amount,Location\n2025-01-05,Lunch,Other,abc,\n";
    let err = importer::read_csv(bad_amount.as_bytes()).unwrap_err();
    assert!(format!("{:#}", err).contains("Row 2"));

    let negative = "Date,Description,Category,Amount,Location\n2025-01-05,Lunch,Other,-4,\n";
    assert!(importer::read_csv(negative.as_bytes()).is_err());

    let unknown = "Date,Description,Category,Amount,Location\n2025-01-05,Lunch,Pets,4,\n";
    assert!(importer::read_csv(unknown.as_bytes()).is_err());
}

#[test]
fn csv_written_by_export_reads_back() {
    let records = vec![
        rec("y", "7", "2025-02-01T08:05:00"),
        rec("x", "3.10", "2025-02-01T18:30:00"),
    ];
    let mut buf = Vec::new();
    export::write_csv(&records, &mut buf).unwrap();
    let back = importer::read_csv(buf.as_slice()).unwrap();
    assert_eq!(back.len(), 2);
    for (a, b) in records.iter().zip(&back) {
        assert_eq!(a.amount, b.amount);
        assert_eq!(a.description, b.description);
        assert_eq!(a.date, b.date);
    }
    // same-day records keep their time-of-day order
    let newest = pocketledger::engine::sort(&back, pocketledger::SortKey::DateDesc);
    assert_eq!(newest[0].description, "row x");
}

#[test]
fn merge_skips_known_ids() {
    let mut store = MemoryStore::with_records(vec![rec("1", "10", "2025-01-01")]);
    let added = importer::merge(
        &mut store,
        vec![rec("1", "99", "2025-01-01"), rec("2", "20", "2025-01-02")],
    )
    .unwrap();
    assert_eq!(added, 1);
    let all = store.load_expenses().unwrap();
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert_eq!(all[1].amount, Decimal::from(10));
}

#[test]
fn backup_import_merges_or_replaces() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("backup.json");
    let settings = Settings {
        currency: Currency::EUR,
        monthly_budget: Decimal::from(500),
        ..Settings::default()
    };
    let backup = Backup::new(vec![rec("b1", "5", "2025-03-01"), rec("keep", "1", "2025-03-02")], settings.clone());
    backup.write(fs::File::create(&path).unwrap()).unwrap();
    let file = path.to_str().unwrap();

    let mut store = MemoryStore::with_records(vec![rec("keep", "1", "2025-03-02"), rec("mine", "2", "2025-03-03")]);
    run(&mut store, &["backup", "--file", file]).unwrap();
    assert_eq!(store.load_expenses().unwrap().len(), 3);
    assert_eq!(store.load_settings().unwrap(), Settings::default());

    run(&mut store, &["backup", "--file", file, "--replace"]).unwrap();
    let ids: Vec<String> = store.load_expenses().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["b1", "keep"]);
    assert_eq!(store.load_settings().unwrap(), settings);
}

#[test]
fn malformed_backup_leaves_store_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"expenses\": [").unwrap();
    let mut store = MemoryStore::with_records(vec![rec("1", "1", "2025-01-01")]);
    assert!(run(&mut store, &["backup", "--file", path.to_str().unwrap()]).is_err());
    assert_eq!(store.load_expenses().unwrap().len(), 1);
}

#[test]
fn csv_import_command_adds_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("in.csv");
    fs::write(
        &path,
        "Date,Description,Category,Amount,Location\n2025-04-01,Gym,Healthcare,30,\n",
    )
    .unwrap();
    let mut store = MemoryStore::new();
    run(&mut store, &["csv", "--file", path.to_str().unwrap()]).unwrap();
    let all = store.load_expenses().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].category, Category::Healthcare);
}
