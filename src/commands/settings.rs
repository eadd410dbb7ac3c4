// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{format_amount, Category, Currency, Settings};
use crate::store::LedgerStore;
use crate::utils::{maybe_print_json, parse_bool, parse_decimal, pretty_table};

pub fn handle(store: &mut dyn LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(store, sub)?,
        Some(("set", sub)) => {
            let updated = apply(store.load_settings()?, sub)?;
            store.save_settings(&updated)?;
            println!("Settings saved");
        }
        Some(("reset", sub)) => {
            if !sub.get_flag("yes") {
                anyhow::bail!("Refusing to delete all data without --yes");
            }
            store.clear()?;
            println!("All expenses and settings cleared");
        }
        _ => {}
    }
    Ok(())
}

/// Applies the `settings set` flags on top of `current`.
pub fn apply(mut current: Settings, sub: &clap::ArgMatches) -> Result<Settings> {
    if let Some(c) = sub.get_one::<String>("currency") {
        current.currency = c.parse::<Currency>()?;
    }
    if let Some(b) = sub.get_one::<String>("budget") {
        current.monthly_budget = parse_decimal(b)?;
    }
    if let Some(c) = sub.get_one::<String>("default_category") {
        current.default_category = c.parse::<Category>()?;
    }
    if let Some(n) = sub.get_one::<String>("notifications") {
        current.notifications = parse_bool(n)?;
    }
    current.validate()?;
    Ok(current)
}

fn show(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let s = store.load_settings()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let count = store.load_expenses()?.len();
    let data = vec![
        vec!["Currency".into(), format!("{} ({})", s.currency, s.currency.symbol())],
        vec!["Monthly budget".into(), format_amount(s.monthly_budget, s.currency)],
        vec!["Default category".into(), s.default_category.to_string()],
        vec!["Notifications".into(), if s.notifications { "on" } else { "off" }.into()],
        vec!["Stored expenses".into(), count.to_string()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], data));
    Ok(())
}
