// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;

use super::filter_spec;
use crate::engine::{self, BudgetStatus, Granularity};
use crate::models::{format_amount, Currency, ExpenseRecord};
use crate::store::LedgerStore;
use crate::utils::{maybe_print_json, parse_month, pretty_table, today};

pub fn handle(store: &dyn LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("by-category", sub)) => by_category(store, sub)?,
        Some(("top", sub)) => top(store, sub)?,
        Some(("trend", sub)) => trend(store, sub)?,
        Some(("highest-day", sub)) => highest_day(store, sub)?,
        Some(("budget", sub)) => budget(store, sub)?,
        Some(("recent", sub)) => recent(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn filtered(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<(Vec<ExpenseRecord>, Currency)> {
    let spec = filter_spec(sub)?;
    let records = engine::filter(&store.load_expenses()?, &spec);
    Ok((records, store.load_settings()?.currency))
}

fn summary(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let (records, ccy) = filtered(store, sub)?;
    let s = engine::summarize(&records, 5);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let highest = match &s.highest_spending_day {
        Some(d) => format!("{} ({})", d.day.format("%a %b %d %Y"), format_amount(d.amount, ccy)),
        None => "no data".to_string(),
    };
    let data = vec![
        vec!["Total Spent".into(), format_amount(s.total_expenses, ccy)],
        vec!["Transactions".into(), s.transaction_count.to_string()],
        vec!["Average per Transaction".into(), format_amount(s.average_per_record, ccy)],
        vec!["Categories".into(), s.category_count.to_string()],
        vec!["Highest Spending Day".into(), highest],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], data));
    Ok(())
}

/// Category rows with their share of the total, in first-appearance order.
pub fn category_rows(records: &[ExpenseRecord], ccy: Currency) -> Vec<Vec<String>> {
    let total = engine::total_amount(records);
    engine::group_by_category(records)
        .iter()
        .map(|(cat, amt)| {
            vec![
                cat.label().to_string(),
                format_amount(*amt, ccy),
                format!("{:.0}%", engine::share_of(*amt, total)),
            ]
        })
        .collect()
}

fn by_category(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let (records, ccy) = filtered(store, sub)?;
    let breakdown = engine::group_by_category(&records);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &breakdown)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Share"], category_rows(&records, ccy))
    );
    Ok(())
}

fn top(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let (records, ccy) = filtered(store, sub)?;
    let n = sub.get_one::<usize>("n").copied().unwrap_or(5);
    let items = engine::top_categories(&records, n);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    let data = items
        .iter()
        .enumerate()
        .map(|(i, (cat, amt))| vec![(i + 1).to_string(), cat.label().to_string(), format_amount(*amt, ccy)])
        .collect();
    println!("{}", pretty_table(&["#", "Category", "Spent"], data));
    Ok(())
}

fn trend(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let (records, ccy) = filtered(store, sub)?;
    let granularity = match sub.get_one::<String>("granularity") {
        Some(g) => g.parse::<Granularity>()?,
        None => Granularity::Month,
    };
    let periods = engine::trend(&records, granularity);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &periods)? {
        return Ok(());
    }
    let data = periods
        .iter()
        .map(|p| vec![p.period.label.clone(), format_amount(p.amount, ccy)])
        .collect();
    println!("{}", pretty_table(&["Period", "Spent"], data));
    Ok(())
}

fn highest_day(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let (records, ccy) = filtered(store, sub)?;
    let best = engine::highest_spending_day(&records);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &best)? {
        return Ok(());
    }
    match best {
        Some(d) => println!("{}: {}", d.day.format("%a %b %d %Y"), format_amount(d.amount, ccy)),
        None => println!("no data"),
    }
    Ok(())
}

/// The `n` latest expenses by date.
pub fn recent_for(store: &dyn LedgerStore, n: usize) -> Result<Vec<ExpenseRecord>> {
    Ok(engine::recent(&store.load_expenses()?, n))
}

fn recent(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let n = sub.get_one::<usize>("n").copied().unwrap_or(3);
    let items = recent_for(store, n)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    let ccy = store.load_settings()?.currency;
    let data = items
        .iter()
        .map(|r| {
            vec![
                r.day().to_string(),
                r.description.clone(),
                r.category.label().to_string(),
                format_amount(r.amount, ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Category", "Amount"], data)
    );
    Ok(())
}

/// Budget position for `--month` (YYYY-MM), or for the current month.
pub fn budget_for(store: &dyn LedgerStore, month: Option<&str>) -> Result<BudgetStatus> {
    let day = match month {
        Some(m) => {
            let (y, mo) = parse_month(m)?;
            NaiveDate::from_ymd_opt(y, mo, 1)
                .ok_or_else(|| anyhow::anyhow!("Invalid month '{}'", m))?
        }
        None => today(),
    };
    let settings = store.load_settings()?;
    Ok(engine::budget_status(&store.load_expenses()?, &settings, day))
}

fn budget(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let status = budget_for(store, sub.get_one::<String>("month").map(String::as_str))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &status)? {
        return Ok(());
    }
    let ccy = status.currency;
    let data = vec![vec![
        format!("{}-{:02}", status.year, status.month),
        format_amount(status.spent, ccy),
        format_amount(status.budget, ccy),
        format_amount(status.remaining, ccy),
        format!("{:.1}%", status.utilization),
    ]];
    println!(
        "{}",
        pretty_table(&["Month", "Spent", "Budget", "Remaining", "Used"], data)
    );
    if status.over_budget {
        println!("Over budget by {}", format_amount(-status.remaining, ccy));
    } else if status.near_limit {
        println!("Warning: you're close to exceeding your monthly budget");
    } else if status.caution {
        println!("Caution: more than 75% of the monthly budget is used");
    }
    Ok(())
}
