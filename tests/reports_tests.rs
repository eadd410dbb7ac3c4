// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::commands::reports;
use pocketledger::models::{currency_symbol, format_amount};
use pocketledger::utils::parse_datetime;
use pocketledger::{cli, Category, Currency, ExpenseRecord, MemoryStore};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn rec(id: &str, amount: &str, cat: Category, date: &str) -> ExpenseRecord {
    ExpenseRecord::with_id(id, dec(amount), cat, format!("item {}", id), parse_datetime(date).unwrap(), None)
        .unwrap()
}

fn store() -> MemoryStore {
    MemoryStore::with_records(vec![
        rec("a", "30", Category::FoodDining, "2025-02-01T09:00:00"),
        rec("b", "60", Category::Shopping, "2025-02-03"),
        rec("c", "10", Category::FoodDining, "2025-02-01T19:00:00"),
        rec("d", "100", Category::RentHousing, "2025-01-28"),
    ])
}

#[test]
fn recent_lists_latest_by_date() {
    let got = reports::recent_for(&store(), 3).unwrap();
    let ids: Vec<&str> = got.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
    assert!(reports::recent_for(&MemoryStore::new(), 3).unwrap().is_empty());
}

#[test]
fn recent_command_accepts_count() {
    let store = store();
    let matches = cli::build_cli().get_matches_from(["pocketledger", "report", "recent", "--n", "2", "--json"]);
    match matches.subcommand() {
        Some(("report", m)) => {
            let Some(("recent", sub)) = m.subcommand() else {
                panic!("no recent subcommand");
            };
            assert_eq!(sub.get_one::<usize>("n"), Some(&2));
            reports::handle(&store, m).unwrap();
        }
        _ => panic!("no report subcommand"),
    }
}

#[test]
fn category_rows_show_share_of_total() {
    let records = reports::category_rows(&[
        rec("a", "30", Category::FoodDining, "2025-02-01"),
        rec("b", "60", Category::Shopping, "2025-02-03"),
        rec("c", "10", Category::FoodDining, "2025-02-01"),
    ], Currency::USD);
    assert_eq!(records[0], vec!["Food & Dining", "$40.00", "40%"]);
    assert_eq!(records[1], vec!["Shopping", "$60.00", "60%"]);
}

#[test]
fn currency_symbols_and_fallback() {
    assert_eq!(currency_symbol("USD"), "$");
    assert_eq!(currency_symbol("eur"), "€");
    assert_eq!(currency_symbol("GBP"), "£");
    assert_eq!(currency_symbol("INR"), "₹");
    assert_eq!(currency_symbol("JPY"), "₹");
    assert_eq!(currency_symbol(""), "₹");
}

#[test]
fn amounts_render_with_two_decimals() {
    assert_eq!(format_amount(dec("25.5"), Currency::INR), "₹25.50");
    assert_eq!(format_amount(dec("1234.567"), Currency::USD), "$1234.57");
    assert_eq!(format_amount(Decimal::ZERO, Currency::EUR), "€0.00");
    assert_eq!(format_amount(dec("9.999"), Currency::AUD), "$10.00");
}
