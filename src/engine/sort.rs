// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Ordering;

use crate::models::{ExpenseRecord, SortKey};

/// Returns a new, stably ordered copy of `records`. Ties keep input order.
pub fn sort(records: &[ExpenseRecord], key: SortKey) -> Vec<ExpenseRecord> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| compare(a, b, key));
    out
}

/// The `n` most recent records, newest first.
pub fn recent(records: &[ExpenseRecord], n: usize) -> Vec<ExpenseRecord> {
    let mut out = sort(records, SortKey::DateDesc);
    out.truncate(n);
    out
}

fn compare(a: &ExpenseRecord, b: &ExpenseRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::DateDesc => b.date.cmp(&a.date),
        SortKey::DateAsc => a.date.cmp(&b.date),
        SortKey::AmountDesc => b.amount.cmp(&a.amount),
        SortKey::AmountAsc => a.amount.cmp(&b.amount),
        SortKey::CategoryAsc => a.category.label().cmp(b.category.label()),
    }
}
