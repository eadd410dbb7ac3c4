// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure transforms over a list of expense records.
//!
//! Nothing in here keeps state between calls or touches storage: callers
//! load the record list, pass it in with their parameters and render what
//! comes back. Inputs are never mutated.

pub mod aggregate;
pub mod budget;
pub mod filter;
pub mod sort;

use std::collections::HashSet;

use crate::error::LedgerError;
use crate::models::ExpenseRecord;

pub use aggregate::{
    average_per_record, group_by_category, group_by_day, group_by_period, highest_spending_day,
    share_of, summarize, top_categories, total_amount, trend, CategoryTotals, DayTotal, Granularity,
    LedgerSummary, Period, PeriodTotal, RECENT_ACTIVITY,
};
pub use budget::{budget_status, budget_utilization, monthly_total, BudgetStatus};
pub use filter::{filter, filter_and_sort};
pub use sort::{recent, sort};

/// Checks every record invariant and id uniqueness, reporting the first violation.
pub fn validate(records: &[ExpenseRecord]) -> Result<(), LedgerError> {
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        r.validate()?;
        if !seen.insert(r.id.as_str()) {
            return Err(LedgerError::invalid_record(
                "id",
                format!("duplicate id '{}'", r.id),
            ));
        }
    }
    Ok(())
}
