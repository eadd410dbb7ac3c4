// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::LedgerError;
use crate::models::{Category, ExpenseRecord};

/// Per-category sums, in order of each category's first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals(Vec<(Category, Decimal)>);

impl CategoryTotals {
    pub fn get(&self, category: Category) -> Option<Decimal> {
        self.0
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, amt)| *amt)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Category, Decimal)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> Decimal {
        self.0.iter().map(|(_, amt)| *amt).sum()
    }

    pub fn into_vec(self) -> Vec<(Category, Decimal)> {
        self.0
    }
}

// Serialized as an object keyed by category label, preserving order.
impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (cat, amt) in &self.0 {
            map.serialize_entry(cat.label(), amt)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Granularity {
    #[default]
    Month,
    Quarter,
    Year,
}

impl Granularity {
    /// First day of the period containing `day`.
    pub fn period_start(self, day: NaiveDate) -> NaiveDate {
        let month = match self {
            Granularity::Month => day.month(),
            Granularity::Quarter => (day.month0() / 3) * 3 + 1,
            Granularity::Year => 1,
        };
        NaiveDate::from_ymd_opt(day.year(), month, 1).unwrap_or(day)
    }

    pub fn label(self, start: NaiveDate) -> String {
        match self {
            Granularity::Month => start.format("%b %Y").to_string(),
            Granularity::Quarter => format!("Q{} {}", start.month0() / 3 + 1, start.year()),
            Granularity::Year => start.year().to_string(),
        }
    }
}

impl FromStr for Granularity {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(Granularity::Month),
            "quarter" => Ok(Granularity::Quarter),
            "year" => Ok(Granularity::Year),
            _ => Err(LedgerError::InvalidGranularity(s.to_string())),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        })
    }
}

/// A time bucket, identified by its first day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub label: String,
    pub start: NaiveDate,
}

/// Sum for one time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodTotal {
    #[serde(flatten)]
    pub period: Period,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayTotal {
    pub day: NaiveDate,
    pub amount: Decimal,
}

pub fn total_amount(records: &[ExpenseRecord]) -> Decimal {
    records.iter().map(|r| r.amount).sum()
}

pub fn group_by_category(records: &[ExpenseRecord]) -> CategoryTotals {
    CategoryTotals(accumulate(records.iter().map(|r| (r.category, r.amount))))
}

/// Highest-spending categories first; equal sums keep first-appearance order.
pub fn top_categories(records: &[ExpenseRecord], n: usize) -> Vec<(Category, Decimal)> {
    rank(group_by_category(records), n)
}

fn rank(totals: CategoryTotals, n: usize) -> Vec<(Category, Decimal)> {
    let mut items = totals.into_vec();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items.truncate(n);
    items
}

pub fn group_by_period(records: &[ExpenseRecord], granularity: Granularity) -> Vec<PeriodTotal> {
    accumulate(
        records
            .iter()
            .map(|r| (granularity.period_start(r.day()), r.amount)),
    )
    .into_iter()
    .map(|(start, amount)| PeriodTotal {
        period: Period {
            label: granularity.label(start),
            start,
        },
        amount,
    })
    .collect()
}

/// Period sums in chronological order.
pub fn trend(records: &[ExpenseRecord], granularity: Granularity) -> Vec<PeriodTotal> {
    let mut periods = group_by_period(records, granularity);
    periods.sort_by_key(|p| p.period.start);
    periods
}

pub fn group_by_day(records: &[ExpenseRecord]) -> Vec<DayTotal> {
    accumulate(records.iter().map(|r| (r.day(), r.amount)))
        .into_iter()
        .map(|(day, amount)| DayTotal { day, amount })
        .collect()
}

/// `None` means there is no data to rank.
pub fn highest_spending_day(records: &[ExpenseRecord]) -> Option<DayTotal> {
    group_by_day(records)
        .into_iter()
        .reduce(|best, d| {
            if d.amount > best.amount || (d.amount == best.amount && d.day < best.day) {
                d
            } else {
                best
            }
        })
}

/// `part` as a percentage of `whole`; zero when `whole` is not positive.
pub fn share_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    Decimal::ONE_HUNDRED * part / whole
}

pub fn average_per_record(records: &[ExpenseRecord]) -> Decimal {
    if records.is_empty() {
        return Decimal::ZERO;
    }
    total_amount(records) / Decimal::from(records.len())
}

/// Every analytics figure the dashboards show, computed in one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total_expenses: Decimal,
    pub transaction_count: usize,
    pub average_per_record: Decimal,
    pub category_count: usize,
    pub category_breakdown: CategoryTotals,
    pub top_categories: Vec<(Category, Decimal)>,
    pub expenses_by_date: Vec<DayTotal>,
    pub monthly_trend: Vec<PeriodTotal>,
    pub highest_spending_day: Option<DayTotal>,
    pub recent_activity: Vec<ExpenseRecord>,
}

/// Entries listed under recent activity in a summary.
pub const RECENT_ACTIVITY: usize = 10;

pub fn summarize(records: &[ExpenseRecord], top_n: usize) -> LedgerSummary {
    let breakdown = group_by_category(records);
    let top = rank(breakdown.clone(), top_n);

    LedgerSummary {
        total_expenses: total_amount(records),
        transaction_count: records.len(),
        average_per_record: average_per_record(records),
        category_count: breakdown.len(),
        category_breakdown: breakdown,
        top_categories: top,
        expenses_by_date: group_by_day(records),
        monthly_trend: trend(records, Granularity::Month),
        highest_spending_day: highest_spending_day(records),
        recent_activity: super::sort::recent(records, RECENT_ACTIVITY),
    }
}

fn accumulate<K, I>(items: I) -> Vec<(K, Decimal)>
where
    K: Eq + Hash + Copy,
    I: IntoIterator<Item = (K, Decimal)>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut out: Vec<(K, Decimal)> = Vec::new();
    for (key, amount) in items {
        match index.get(&key) {
            Some(&i) => out[i].1 += amount,
            None => {
                index.insert(key, out.len());
                out.push((key, amount));
            }
        }
    }
    out
}
