// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::db::SqliteStore;
use pocketledger::utils::parse_datetime;
use pocketledger::{
    Category, Currency, ExpenseRecord, LedgerError, LedgerStore, MemoryStore, Settings, StoreError,
};
use rusqlite::params;
use rust_decimal::Decimal;

fn rec(id: &str, amount: &str, cat: Category, date: &str) -> ExpenseRecord {
    ExpenseRecord::with_id(
        id,
        amount.parse().unwrap(),
        cat,
        format!("expense {}", id),
        parse_datetime(date).unwrap(),
        None,
    )
    .unwrap()
}

fn exercise_store(store: &mut dyn LedgerStore) {
    assert!(store.load_expenses().unwrap().is_empty());
    assert_eq!(store.load_settings().unwrap(), Settings::default());

    store.add_expense(rec("1", "10", Category::Shopping, "2024-01-01")).unwrap();
    store.add_expense(rec("2", "20", Category::Healthcare, "2024-01-02")).unwrap();
    let ids: Vec<String> = store.load_expenses().unwrap().into_iter().map(|r| r.id).collect();
    // newest addition first
    assert_eq!(ids, vec!["2", "1"]);

    let dup = store.add_expense(rec("1", "5", Category::Other, "2024-01-03"));
    assert!(matches!(
        dup,
        Err(StoreError::Ledger(LedgerError::InvalidRecord { field: "id", .. }))
    ));

    assert!(store.delete_expense("1").unwrap());
    assert!(!store.delete_expense("1").unwrap());
    assert_eq!(store.load_expenses().unwrap().len(), 1);

    let settings = Settings {
        currency: Currency::EUR,
        monthly_budget: "1500.50".parse().unwrap(),
        default_category: Category::FoodDining,
        notifications: false,
    };
    store.save_settings(&settings).unwrap();
    assert_eq!(store.load_settings().unwrap(), settings);

    let bad = Settings {
        monthly_budget: Decimal::NEGATIVE_ONE,
        ..Settings::default()
    };
    assert!(store.save_settings(&bad).is_err());

    store.clear().unwrap();
    assert!(store.load_expenses().unwrap().is_empty());
    assert_eq!(store.load_settings().unwrap(), Settings::default());
}

#[test]
fn memory_store_contract() {
    let mut store = MemoryStore::new();
    exercise_store(&mut store);
}

#[test]
fn sqlite_store_contract() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    exercise_store(&mut store);
}

#[test]
fn sqlite_save_keeps_list_order_and_values() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut records = vec![
        rec("c", "3.333", Category::Entertainment, "2024-03-03T18:30:00"),
        rec("a", "1", Category::Other, "2024-01-01"),
        rec("b", "2.50", Category::RentHousing, "2024-02-02"),
    ];
    records[1].location = Some("Home".into());
    store.save_expenses(&records).unwrap();
    assert_eq!(store.load_expenses().unwrap(), records);

    // a second save replaces the list wholesale
    store.save_expenses(&records[..1]).unwrap();
    assert_eq!(store.load_expenses().unwrap(), records[..1].to_vec());
}

#[test]
fn sqlite_save_rejects_invalid_records() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut bad = rec("x", "1", Category::Other, "2024-01-01");
    bad.amount = "-1".parse().unwrap();
    let err = store.save_expenses(&[bad]).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Ledger(LedgerError::InvalidRecord { field: "amount", .. })
    ));
    assert!(store.load_expenses().unwrap().is_empty());
}

#[test]
fn unknown_stored_category_lands_in_other() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .connection()
        .execute(
            "INSERT INTO expenses(id, amount, category, description, date) VALUES (?1,?2,?3,?4,?5)",
            params!["legacy", "7.25", "Pets", "Dog food", "2024-04-01T00:00:00"],
        )
        .unwrap();
    let records = store.load_expenses().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category, Category::Other);
    assert_eq!(records[0].amount, "7.25".parse::<Decimal>().unwrap());
}

#[test]
fn corrupt_amount_is_reported() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .connection()
        .execute(
            "INSERT INTO expenses(id, amount, category, description, date) VALUES ('z','abc','Other','x','2024-01-01')",
            [],
        )
        .unwrap();
    assert!(matches!(
        store.load_expenses(),
        Err(StoreError::Corrupt { column: "amount", .. })
    ));
}

#[test]
fn file_backed_store_persists_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    {
        let mut store = pocketledger::db::open_or_init(Some(path.as_path())).unwrap();
        store.add_expense(rec("p", "42", Category::Shopping, "2024-06-01")).unwrap();
    }
    let store = pocketledger::db::open_or_init(Some(path.as_path())).unwrap();
    let records = store.load_expenses().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "p");
}
