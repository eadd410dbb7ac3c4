// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Currency, ExpenseRecord, Settings};

/// Utilization, in percent, above which a budget counts as nearly used up.
const NEAR_LIMIT_PCT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Utilization, in percent, above which spending deserves a caution.
const CAUTION_PCT: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

/// Percentage of `budget` consumed by `spent`. A non-positive budget yields zero.
pub fn budget_utilization(spent: Decimal, budget: Decimal) -> Decimal {
    super::aggregate::share_of(spent, budget)
}

/// Total for one calendar month (`month` is 1-12) in local time.
pub fn monthly_total(records: &[ExpenseRecord], month: u32, year: i32) -> Decimal {
    records
        .iter()
        .filter(|r| r.date.month() == month && r.date.year() == year)
        .map(|r| r.amount)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub year: i32,
    pub month: u32,
    pub currency: Currency,
    pub spent: Decimal,
    pub budget: Decimal,
    /// Negative once the budget is exceeded.
    pub remaining: Decimal,
    pub utilization: Decimal,
    /// Above 75% used.
    pub caution: bool,
    /// Above 90% used.
    pub near_limit: bool,
    pub over_budget: bool,
}

/// Budget position for the month containing `day`.
pub fn budget_status(records: &[ExpenseRecord], settings: &Settings, day: NaiveDate) -> BudgetStatus {
    let (year, month) = (day.year(), day.month());
    let spent = monthly_total(records, month, year);
    let budget = settings.monthly_budget;
    let utilization = budget_utilization(spent, budget);

    tracing::debug!(%spent, %budget, %utilization, year, month, "budget status");

    BudgetStatus {
        year,
        month,
        currency: settings.currency,
        spent,
        budget,
        remaining: budget - spent,
        utilization,
        caution: budget > Decimal::ZERO && utilization > CAUTION_PCT,
        near_limit: budget > Decimal::ZERO && utilization > NEAR_LIMIT_PCT,
        over_budget: budget > Decimal::ZERO && spent > budget,
    }
}
